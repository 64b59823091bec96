//! 图像上的圆盘.
//!
//! 我们一般使用行优先编码存储二维图像. 其中行就是 "Height" (垂直方向), 列就是 "Width" (水平方向).
//! 圆心和半径都以实数表示, 因此圆心可以落在两个像素之间 (例如宽度为奇数时).
//!
//! 点 `(r, c)` 到圆心 `(cr, cc)` 的距离只以平方形式参与计算, 从不开方.

use super::Mask2d;
use crate::{Idx2d, Idx2dF};
use std::fmt::Formatter;

/// 二维图像上的一个圆盘, 由圆心和半径的平方组成.
///
/// 该结构不负责检测图像越界.
#[derive(Copy, Clone, PartialEq)]
pub struct Disc {
    /// 圆心 (行, 列).
    center: Idx2dF,
    /// 半径的平方.
    radius_sq: f64,
}

/// 压缩到一行, 并同时给出半径.
impl std::fmt::Debug for Disc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Disc {{ center: ({:.2}, {:.2}), radius: {:.4} }}",
            self.center.0,
            self.center.1,
            self.radius()
        ))
    }
}

impl Disc {
    /// 形状为 `(h, w)` 的图像的内切圆盘: 圆心为 `(h / 2, w / 2)`, 半径为 `h / 2`.
    ///
    /// 注意半径只取决于高. 当 `h > w` 时, 圆盘会超出左右边界.
    #[inline]
    pub fn inscribed((h, w): Idx2d) -> Self {
        let (cr, cc) = (h as f64 / 2.0, w as f64 / 2.0);
        Self {
            center: (cr, cc),
            radius_sq: cr * cr,
        }
    }

    /// 获取圆心.
    #[inline]
    pub fn center(&self) -> Idx2dF {
        self.center
    }

    /// 获取圆心所在的行 (可能非整数).
    #[inline]
    pub fn center_row(&self) -> f64 {
        self.center.0
    }

    /// 获取半径的平方.
    #[inline]
    pub fn radius_sq(&self) -> f64 {
        self.radius_sq
    }

    /// 获取半径.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius_sq.sqrt()
    }

    /// 像素 `(r, c)` 到圆心距离的平方.
    #[inline]
    pub fn distance_sq_to(&self, (r, c): Idx2d) -> f64 {
        let dr = r as f64 - self.center.0;
        let dc = c as f64 - self.center.1;
        dr * dr + dc * dc
    }

    /// 判断像素 `(r, c)` 是否在圆盘内 (含圆周).
    #[inline]
    pub fn contains(&self, pos: Idx2d) -> bool {
        self.distance_sq_to(pos) <= self.radius_sq
    }

    /// 判断像素 `(r, c)` 是否严格位于圆心所在行的上方.
    #[inline]
    pub fn is_above_center(&self, (r, _): Idx2d) -> bool {
        (r as f64) < self.center.0
    }

    /// 生成形状为 `shape` 的掩码, 选中所有严格位于圆盘之外的像素.
    ///
    /// 该掩码恰好是 [`Self::contains`] 的逐像素取反.
    pub fn outside_mask(&self, shape: Idx2d) -> Mask2d {
        Mask2d::from_fn(shape, |pos| !self.contains(pos))
    }

    /// 生成形状为 `shape` 的掩码, 选中所有严格位于圆心所在行上方的像素.
    pub fn upper_half_mask(&self, shape: Idx2d) -> Mask2d {
        Mask2d::from_fn(shape, |pos| self.is_above_center(pos))
    }

    /// 生成形状为 `shape` 的掩码, 选中圆盘之外、且位于圆心上方的像素.
    ///
    /// 等价于 `upper_half_mask(shape) AND outside_mask(shape)`, 因此一定是
    /// [`Self::outside_mask`] 的子集.
    pub fn upper_half_outside_mask(&self, shape: Idx2d) -> Mask2d {
        Mask2d::from_fn(shape, |pos| self.is_above_center(pos) && !self.contains(pos))
    }
}
