use encoding_plz::EncodingChain;
use tracing::{debug, warn};

use crate::{body::Body, closer::close_all, error::UnpackError};

pub mod magic_bytes;
pub mod peek;
pub mod stage;

use stage::{Layer, OpenFailure, Source, Stage};

/* Steps:
 *      1. Raw body is the bottom of the stack.
 *      2. Walk the chain from the last token to the first, skipping
 *         identity, and open one stage per token on top of the stack.
 *      3. If a stage fails to open, close everything opened so far and
 *         fail with the token of that stage.
 */
pub fn build(
    body: Body,
    chain: &EncodingChain,
) -> Result<Box<dyn Layer>, UnpackError> {
    // 1. Raw body
    let mut top: Box<dyn Layer> = Box::new(Source::new(body));
    // 2. Stages
    for encoding in chain.unwrap_order() {
        top = match Stage::open(top, encoding.clone()) {
            Ok(stage) => {
                debug!("stage| {:?}", stage);
                Box::new(stage)
            }
            // 3. Failed
            Err(OpenFailure {
                input,
                source,
            }) => {
                warn!("open| {}| {}", encoding, source);
                if let Some(input) = input
                    && let Err(e) = close_all(input)
                {
                    warn!("{}", e);
                }
                return Err(UnpackError::Open {
                    encoding: encoding.clone(),
                    source,
                });
            }
        };
    }
    Ok(top)
}
