//! Built-in asset set: the stock models the graphics samples load.

use super::{AssetEntry, Manifest};

const MODEL_ARCHIVES: &[&str] = &[
    "https://casual-effects.com/g3d/data10/research/model/bunny/bunny.zip",
    "https://casual-effects.com/g3d/data10/common/model/crytek_sponza/sponza.zip",
    "https://casual-effects.com/g3d/data10/research/model/erato/erato.zip",
    "https://casual-effects.com/g3d/data10/research/model/rungholt/rungholt.zip",
    "https://casual-effects.com/g3d/data10/research/model/sibenik/sibenik.zip",
    "https://casual-effects.com/g3d/data10/research/model/sportsCar/sportsCar.zip",
    "https://casual-effects.com/g3d/data10/common/model/teapot/teapot.zip",
    "https://casual-effects.com/g3d/data10/research/model/dragon/dragon.zip",
    "https://casual-effects.com/g3d/data10/common/model/CornellBox/CornellBox.zip",
];

/// Direct (non-archive) downloads. None ship by default.
const DIRECT_FILES: &[&str] = &[];

pub(super) fn default_manifest() -> Manifest {
    let assets = MODEL_ARCHIVES
        .iter()
        .map(|url| AssetEntry::archive(*url))
        .chain(DIRECT_FILES.iter().map(|url| AssetEntry::direct(*url)))
        .collect();
    Manifest::new(assets)
}
