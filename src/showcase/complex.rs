//! A list of items rendered through nested sections.

use crate::models::{Context, Value};

pub(super) const TEMPLATE: &str = r#"<h1>{{header}}</h1>
{{#list}}
<ul>
{{#item}}
{{#current}}
  <li><strong>{{name}}</strong></li>
{{/current}}
{{#link}}
    <li><a href="{{url}}">{{name}}</a></li>
{{/link}}
{{/item}}
    </ul>
{{/list}}
{{#empty}}
<p>The list is empty.</p>
{{/empty}}
"#;

struct Color {
    name: &'static str,
    current: bool,
    url: &'static str,
}

const COLORS: [Color; 3] = [
    Color {
        name: "red",
        current: true,
        url: "#Red",
    },
    Color {
        name: "green",
        current: false,
        url: "#Green",
    },
    Color {
        name: "blue",
        current: false,
        url: "#Blue",
    },
];

pub(super) fn context() -> Context {
    let items: Vec<Value> = COLORS
        .iter()
        .map(|color| {
            Context::new()
                .with("name", color.name)
                .with("current", color.current)
                .with("link", !color.current)
                .with("url", color.url)
                .into()
        })
        .collect();

    Context::new()
        .with("header", "Colors")
        .with("list", !items.is_empty())
        .with("empty", items.is_empty())
        .with("item", items)
}
