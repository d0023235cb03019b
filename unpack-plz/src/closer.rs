use tracing::warn;

use crate::{decompression::stage::Layer, error::CloseError};

/* Description:
 *      Release every layer of the stack, last opened first, ending with the
 *      raw body. A failing release is recorded and the walk goes on, all
 *      failures are returned together.
 */
pub fn close_all(top: Box<dyn Layer>) -> Result<(), CloseError> {
    let mut errors = Vec::new();
    let mut current = Some(top);
    while let Some(mut layer) = current {
        if let Err(e) = layer.release() {
            warn!(
                "release| {}| {}",
                layer.encoding().map_or("body", |enc| enc.as_ref()),
                e
            );
            errors.push(e);
        }
        current = layer.peel();
    }
    CloseError::check(errors)
}
