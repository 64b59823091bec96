//! 🛰️欢迎光临🌲
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx2d, Idx3d};

pub use crate::data::{ChannelStats, ImageMirror, ImageStats, ImgWriteRaw, ImgWriteVis, SatImage};

#[cfg(feature = "plot")]
pub use crate::data::ImgDisplay;

pub use crate::consts::Channel;
pub use crate::error::{MaskError, OpenImageError};
pub use crate::mask::{Cmp, CompactMask, Disc, Mask2d, Mask3d, Threshold};
pub use crate::scene::{Scene, SceneOutcome, SceneSource};

pub use crate::dataset::home_dataset_dir_with;
