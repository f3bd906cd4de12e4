// RoleLens - ui/values.rs
//
// Lists the values each filter accepts, so users can build --method and
// --role arguments without opening the CSV.

use crate::app::state::AppState;
use std::fmt::Write;

pub fn render(state: &AppState) -> String {
    let options = state.filter_options();
    let mut out = String::new();

    let _ = writeln!(out, "Method: {}", options.methods.join(", "));
    for (role, values) in &options.roles {
        let _ = writeln!(
            out,
            "{}: {}",
            state.schema().role_name(*role),
            values.join(", ")
        );
    }
    out
}
