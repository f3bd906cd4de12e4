// RoleLens - core/classify.rs
//
// "Interesting" rows: endpoints the unauthenticated identity can reach with
// a real (non-OPTIONS) request. Shared by the filter and the renderers.

use crate::core::model::{Row, Status};
use crate::core::schema::Schema;
use crate::util::constants::OPTIONS_METHOD;

/// True when the unauth column exists, reports ACCESSIBLE for this row,
/// and the method is not OPTIONS.
pub fn is_interesting(row: &Row, schema: &Schema) -> bool {
    let Some(unauth) = schema.unauth() else {
        return false;
    };
    row.role(unauth) == Some(Status::Accessible.label()) && row.method() != OPTIONS_METHOD
}
