//! A title passed through an escaped reference.

use crate::models::Context;

pub(super) const TEMPLATE: &str = "<h1>{{title}}</h1>";

pub(super) fn context() -> Context {
    Context::new().with("title", "Bear > Shark")
}
