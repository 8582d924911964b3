//! Page-wide scroll lock shared by every open session.

use crate::dom::dom_error;
use embed_core::{EmbedResult, LockChange, ScrollLock, NO_SCROLL_CLASS};
use std::cell::RefCell;
use web_sys::HtmlElement;

thread_local! {
    static SCROLL_LOCK: RefCell<ScrollLock> = RefCell::new(ScrollLock::new());
}

pub(crate) fn acquire(body: &HtmlElement) -> EmbedResult<()> {
    let change = SCROLL_LOCK.with(|lock| lock.borrow_mut().acquire());
    apply(body, change)
}

/// Drop one hold on the lock. The class stays on `<body>` while any other
/// session is still open; only the last release removes it.
pub(crate) fn release(body: &HtmlElement) -> EmbedResult<()> {
    let change = SCROLL_LOCK.with(|lock| lock.borrow_mut().release());
    apply(body, change)
}

/// Number of sessions currently holding the lock
pub fn holders() -> usize {
    SCROLL_LOCK.with(|lock| lock.borrow().holders())
}

fn apply(body: &HtmlElement, change: LockChange) -> EmbedResult<()> {
    match change {
        LockChange::Engage => body.class_list().add_1(NO_SCROLL_CLASS).map_err(dom_error),
        LockChange::Disengage => body.class_list().remove_1(NO_SCROLL_CLASS).map_err(dom_error),
        LockChange::Unchanged => Ok(()),
    }
}
