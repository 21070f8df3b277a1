//! Static assets sent to the device.

use bytes::Bytes;
use std::path::Path;
use tracing::{debug, instrument};

use crate::core::wire::MAX_FIELD_LEN;
use crate::error::SetupError;

/// Load the menu icon once at startup.
///
/// The icon travels in a u16 length-prefixed blob, so anything larger than
/// [`MAX_FIELD_LEN`] is rejected here instead of being cut on the wire.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_menu_icon<P: AsRef<Path>>(path: P) -> Result<Bytes, SetupError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| SetupError::AssetUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    if data.len() > MAX_FIELD_LEN {
        return Err(SetupError::AssetTooLarge {
            path: path.to_path_buf(),
            size: data.len(),
            max: MAX_FIELD_LEN,
        });
    }

    debug!(size = data.len(), "Menu icon loaded");
    Ok(Bytes::from(data))
}
