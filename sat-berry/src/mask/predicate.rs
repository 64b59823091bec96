//! 像素值谓词.

use super::{Mask2d, Mask3d};
use crate::consts::Channel;
use crate::SatImage;
use ndarray::{Axis, Zip};
use std::fmt::{Display, Formatter};

/// 标量比较运算符.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Cmp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl Cmp {
    /// 计算 `lhs OP rhs`.
    #[inline]
    pub const fn eval(self, lhs: u8, rhs: u8) -> bool {
        match self {
            Cmp::Lt => lhs < rhs,
            Cmp::Le => lhs <= rhs,
            Cmp::Gt => lhs > rhs,
            Cmp::Ge => lhs >= rhs,
            Cmp::Eq => lhs == rhs,
            Cmp::Ne => lhs != rhs,
        }
    }

    /// 运算符的书写形式.
    pub const fn symbol(self) -> &'static str {
        match self {
            Cmp::Lt => "<",
            Cmp::Le => "<=",
            Cmp::Gt => ">",
            Cmp::Ge => ">=",
            Cmp::Eq => "==",
            Cmp::Ne => "!=",
        }
    }
}

/// 单通道阈值谓词 `pixel[channel] OP value`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Threshold {
    /// 作用的通道.
    pub channel: Channel,

    /// 比较运算符.
    pub cmp: Cmp,

    /// 阈值.
    pub value: u8,
}

/// 形如 `Red < 150`.
impl Display for Threshold {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {} {}", self.channel, self.cmp.symbol(), self.value)
    }
}

impl Threshold {
    /// 创建阈值谓词.
    #[inline]
    pub const fn new(channel: Channel, cmp: Cmp, value: u8) -> Self {
        Self {
            channel,
            cmp,
            value,
        }
    }

    /// 判断一个 RGB 像素是否满足谓词.
    #[inline]
    pub const fn eval_pixel(&self, pixel: [u8; 3]) -> bool {
        self.cmp.eval(pixel[self.channel.index()], self.value)
    }

    /// 在整幅图像上求值, 得到形状为 `(H, W)` 的掩码.
    pub fn mask(&self, image: &SatImage) -> Mask2d {
        let (cmp, t) = (self.cmp, self.value);
        let plane = image.data().index_axis_move(Axis(2), self.channel.index());
        Mask2d::from_array(Zip::from(&plane).map_collect(|&v| cmp.eval(v, t)))
    }

    /// 同 [`Self::mask`], 但借助 `rayon` 并行求值.
    #[cfg(feature = "rayon")]
    pub fn par_mask(&self, image: &SatImage) -> Mask2d {
        let (cmp, t) = (self.cmp, self.value);
        let plane = image.data().index_axis_move(Axis(2), self.channel.index());
        Mask2d::from_array(Zip::from(&plane).par_map_collect(|&v| cmp.eval(v, t)))
    }
}

/// 在整幅图像的每个分量上求值 `value OP t`, 得到形状为 `(H, W, 3)` 的掩码.
pub(crate) fn value_mask(image: &SatImage, cmp: Cmp, t: u8) -> Mask3d {
    Mask3d::from_array(image.data().mapv(|v| cmp.eval(v, t)))
}
