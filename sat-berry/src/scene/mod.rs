//! 演示场景.
//!
//! 每个场景都是一次独立的 "载入 - 变换 - 丢弃": 场景总是作用于源图像的一份全新拷贝,
//! 场景之间不共享任何可变状态. 参见 [`SceneSource`].

mod source;

pub use source::{SceneOutcome, SceneSource};

use crate::consts::scene::*;
use crate::consts::{gray, Channel};
use crate::mask::{Cmp, Disc, Mask2d, Threshold};
use crate::{MaskError, SatImage};
use log::info;
use std::fmt::{Display, Formatter};

/// 演示场景.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Scene {
    /// 将单个像素 [`SINGLE_PIXEL`] 的三个分量置零.
    SinglePixel,

    /// 将 [`BAND_ROWS`] 行范围内的绿色分量设为最大值.
    GreenBand,

    /// 将 [`BAND_ROWS`] 行范围内的全部分量设为最大值.
    WhiteBand,

    /// 将 [`BAND_ROWS`] 行范围内的全部分量置零.
    BlackBand,

    /// 将所有严格小于 [`LOW_VALUE`] 的分量置零.
    LowValue,

    /// 将主对角线上的像素设为白色.
    Diagonal,

    /// 将内切圆之外的像素置零.
    OutsideDisc,

    /// 将内切圆之外、且位于中心行上方的像素设为白色.
    UpperHalfDisc,

    /// 高程检测: 红色分量严格小于 [`HIGH_CHANNEL`] 的像素置零.
    HighAltitude,

    /// 坡度检测: 绿色分量严格小于 [`HIGH_CHANNEL`] 的像素置零.
    HighSlope,

    /// 坡向检测: 蓝色分量严格小于 [`HIGH_CHANNEL`] 的像素置零.
    HighAspect,

    /// 组合检测: 同时满足三个通道阈值的像素置零.
    Composite,
}

impl Scene {
    /// 全部场景, 按演示顺序排列.
    pub const ALL: [Scene; 12] = [
        Scene::SinglePixel,
        Scene::GreenBand,
        Scene::WhiteBand,
        Scene::BlackBand,
        Scene::LowValue,
        Scene::Diagonal,
        Scene::OutsideDisc,
        Scene::UpperHalfDisc,
        Scene::HighAltitude,
        Scene::HighSlope,
        Scene::HighAspect,
        Scene::Composite,
    ];

    /// 场景的短名称, 适合用作文件名.
    pub const fn name(self) -> &'static str {
        match self {
            Scene::SinglePixel => "single-pixel",
            Scene::GreenBand => "green-band",
            Scene::WhiteBand => "white-band",
            Scene::BlackBand => "black-band",
            Scene::LowValue => "low-value",
            Scene::Diagonal => "diagonal",
            Scene::OutsideDisc => "outside-disc",
            Scene::UpperHalfDisc => "upper-half-disc",
            Scene::HighAltitude => "high-altitude",
            Scene::HighSlope => "high-slope",
            Scene::HighAspect => "high-aspect",
            Scene::Composite => "composite",
        }
    }

    /// 组合场景使用的三个阈值. 它们 **全部** 参与 AND 组合.
    pub const fn composite_thresholds() -> [Threshold; 3] {
        [
            Threshold::new(Channel::Red, Cmp::Lt, COMPOSITE_RED_BELOW),
            Threshold::new(Channel::Green, Cmp::Gt, COMPOSITE_GREEN_ABOVE),
            Threshold::new(Channel::Blue, Cmp::Lt, COMPOSITE_BLUE_BELOW),
        ]
    }

    /// 单通道高值检测场景对应的阈值. 其他场景返回 `None`.
    pub const fn high_channel_threshold(self) -> Option<Threshold> {
        let channel = match self {
            Scene::HighAltitude => Channel::ALTITUDE,
            Scene::HighSlope => Channel::SLOPE,
            Scene::HighAspect => Channel::ASPECT,
            _ => return None,
        };
        Some(Threshold::new(channel, Cmp::Lt, HIGH_CHANNEL))
    }

    /// 在 `image` 上计算组合场景的掩码.
    pub fn composite_mask(image: &SatImage) -> Result<Mask2d, MaskError> {
        let masks = Self::composite_thresholds().map(|t| t.mask(image));
        Mask2d::all_of(&masks)
    }

    /// 就地对 `image` 实施该场景的变换.
    ///
    /// 返回被改写的单元个数: 对逐像素的场景是像素个数, 对 [`Scene::LowValue`]
    /// 是分量个数, 对条带场景是行数.
    pub fn apply(self, image: &mut SatImage) -> Result<usize, MaskError> {
        let shape = image.plane_shape();
        let affected = match self {
            Scene::SinglePixel => image.set_pixel(SINGLE_PIXEL, gray::BLACK).map(|_| 1)?,
            Scene::GreenBand => image.fill_rows_channel(BAND_ROWS, Channel::Green, gray::WHITE),
            Scene::WhiteBand => image.fill_rows(BAND_ROWS, gray::WHITE),
            Scene::BlackBand => image.fill_rows(BAND_ROWS, gray::BLACK),
            Scene::LowValue => {
                let mask = image.value_mask(Cmp::Lt, LOW_VALUE);
                image.fill_where_3d(&mask, gray::BLACK)?
            }
            Scene::Diagonal => image.fill_diagonal(gray::WHITE)?,
            Scene::OutsideDisc => {
                let mask = Disc::inscribed(shape).outside_mask(shape);
                image.fill_where(&mask, gray::BLACK)?
            }
            Scene::UpperHalfDisc => {
                let mask = Disc::inscribed(shape).upper_half_outside_mask(shape);
                image.fill_where(&mask, gray::WHITE)?
            }
            Scene::HighAltitude | Scene::HighSlope | Scene::HighAspect => {
                let mask = self
                    .high_channel_threshold()
                    .map_or_else(|| Mask2d::filled(shape, false), |t| t.mask(image));
                image.fill_where(&mask, gray::BLACK)?
            }
            Scene::Composite => {
                let mask = Self::composite_mask(image)?;
                image.fill_where(&mask, gray::BLACK)?
            }
        };
        info!("scene `{self}`: {affected} affected");
        Ok(affected)
    }
}

impl Display for Scene {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
