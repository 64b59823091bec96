//! 通用常量.

use crate::MaskError;

/// 单通道颜色.
pub mod gray {
    /// 单通道黑色.
    pub const BLACK: u8 = 0b_0000_0000;

    /// 单通道暗灰色.
    pub const DARK_GRAY: u8 = 0b_0100_0000;

    /// 单通道灰色.
    pub const GRAY: u8 = 0b_1000_0000;

    /// 单通道亮灰色.
    pub const LIGHT_GRAY: u8 = 0b_1100_0000;

    /// 单通道白色.
    pub const WHITE: u8 = 0b_1111_1111;

    /// 掩码可视化时, 选中位置映射到的颜色.
    #[inline]
    pub const fn pretty(selected: bool) -> u8 {
        if selected {
            WHITE
        } else {
            BLACK
        }
    }
}

/// 图像通道数. `sd-3layers` 总是三通道.
pub const CHANNELS: usize = 3;

/// 像素通道.
///
/// 卫星图像的三个颜色通道分别被借用来表示三种地形量. 这里同时提供
/// 颜色名和地形量名两套别名.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Channel {
    /// 红色通道, 高程.
    Red = 0,

    /// 绿色通道, 坡度.
    Green = 1,

    /// 蓝色通道, 坡向.
    Blue = 2,
}

impl Channel {
    /// 高程, 即红色通道.
    pub const ALTITUDE: Channel = Channel::Red;

    /// 坡度, 即绿色通道.
    pub const SLOPE: Channel = Channel::Green;

    /// 坡向, 即蓝色通道.
    pub const ASPECT: Channel = Channel::Blue;

    /// 全部通道, 按索引升序.
    pub const ALL: [Channel; CHANNELS] = [Channel::Red, Channel::Green, Channel::Blue];

    /// 通道在数组第三维上的索引.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 地形量名称.
    pub const fn terrain_name(self) -> &'static str {
        match self {
            Channel::Red => "altitude",
            Channel::Green => "slope",
            Channel::Blue => "aspect",
        }
    }
}

impl TryFrom<usize> for Channel {
    type Error = MaskError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::Red),
            1 => Ok(Channel::Green),
            2 => Ok(Channel::Blue),
            other => Err(MaskError::ChannelOutOfRange(other)),
        }
    }
}

/// 演示场景使用的参数.
pub mod scene {
    use crate::Idx2d;
    use std::ops::Range;

    /// 单像素场景修改的位置: 第 150 行, 第 250 列.
    pub const SINGLE_PIXEL: Idx2d = (150, 250);

    /// 条带场景修改的行范围.
    pub const BAND_ROWS: Range<usize> = 200..800;

    /// 低值过滤阈值. 严格小于该值的分量会被置零.
    pub const LOW_VALUE: u8 = 200;

    /// 单通道高值检测阈值. 该通道严格小于该值的像素会被置零.
    pub const HIGH_CHANNEL: u8 = 150;

    /// 组合场景: 红色通道上界 (严格).
    pub const COMPOSITE_RED_BELOW: u8 = 150;

    /// 组合场景: 绿色通道下界 (严格).
    pub const COMPOSITE_GREEN_ABOVE: u8 = 100;

    /// 组合场景: 蓝色通道上界 (严格).
    pub const COMPOSITE_BLUE_BELOW: u8 = 100;
}
