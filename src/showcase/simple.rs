//! Plain substitution of a string, an integer and a float.

use crate::models::Context;

pub(super) const TEMPLATE: &str = "Hello {{name}}
You have just won ${{winnings}}!
{{#in_ca}}
Well, ${{taxed}}, after taxes.
{{/in_ca}}
";

const WINNINGS: u32 = 10_000;
const TAX_RATE: f64 = 0.4;

pub(super) fn context() -> Context {
    let winnings = f64::from(WINNINGS);
    Context::new()
        .with("name", "Chris")
        .with("winnings", WINNINGS)
        .with("taxed", winnings - winnings * TAX_RATE)
        .with("in_ca", true)
}
