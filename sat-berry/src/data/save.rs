//! 图像与掩码的持久化存储.

use super::SatImage;
use crate::consts::gray::pretty;
use crate::mask::{Mask2d, Mask3d};
use image::error::{ImageError, ParameterError, ParameterErrorKind};
use image::{GrayImage, ImageResult, Luma, RgbImage};
use num::ToPrimitive;
use std::path::Path;

/// 表明一个可以通过 **可视化友好** 模式持久化存储的图像对象.
///
/// `ImgWriteVis` trait 的意图是, 对象将以 "可视化友好" 的方式保存,
/// 而不是 "as is" 的方式. 这意味着, 对于 `Mask2d`, `Mask3d`
/// 这类仅存在 `true`/`false` 的对象, 在保存时会映射为白色/黑色;
/// 对于 `SatImage`, 则直接按 RGB 保存.
///
/// 保存格式由 `path` 的扩展名决定.
pub trait ImgWriteVis {
    /// 按照一定的可视化规则将图片保存到 `path` 路径.
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 表明一个可以通过 **按原样** 模式持久化存储的图像对象.
///
/// 对于掩码, 这意味着 `true`/`false` 被存储为 `1`/`0`, 肉眼几乎不可分辨.
pub trait ImgWriteRaw {
    /// 按原样将图片保存到 `path` 路径.
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 将 (高, 宽) 转换为 `image` 要求的 `u32` (宽, 高).
fn dims_u32(h: usize, w: usize) -> ImageResult<(u32, u32)> {
    match (w.to_u32(), h.to_u32()) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(dimension_mismatch()),
    }
}

#[inline]
fn dimension_mismatch() -> ImageError {
    ImageError::Parameter(ParameterError::from_kind(
        ParameterErrorKind::DimensionMismatch,
    ))
}

/// 将行优先的 `(H, W, 3)` 分量序列保存为 RGB 图像.
fn save_rgb<P, I>(path: P, (h, w): (usize, usize), values: I) -> ImageResult<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = u8>,
{
    let (w, h) = dims_u32(h, w)?;
    let buf = RgbImage::from_raw(w, h, values.into_iter().collect())
        .ok_or_else(dimension_mismatch)?;
    buf.save(path)
}

/// 将二维掩码逐像素映射后保存为灰度图像.
fn save_mask_gray<P: AsRef<Path>>(mask: &Mask2d, path: P, f: fn(bool) -> u8) -> ImageResult<()> {
    let (h, w) = mask.shape();
    let (w, h) = dims_u32(h, w)?;
    let mut buf = GrayImage::new(w, h);
    for ((r, c), &m) in mask.array_view().indexed_iter() {
        buf.put_pixel(c as u32, r as u32, Luma([f(m)]));
    }
    buf.save(path)
}

/// 直接按 RGB 存储.
impl ImgWriteVis for SatImage {
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        save_rgb(path, self.plane_shape(), self.data().iter().copied())
    }
}

/// 直接按 RGB 存储, 与 `ImgWriteVis` 相同.
impl ImgWriteRaw for SatImage {
    #[inline]
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        ImgWriteVis::save(self, path)
    }
}

/// 选中的像素为白色, 未选中的像素为黑色.
impl ImgWriteVis for Mask2d {
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        save_mask_gray(self, path, pretty)
    }
}

/// 选中的像素为 `1`, 未选中的像素为 `0`.
impl ImgWriteRaw for Mask2d {
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        save_mask_gray(self, path, u8::from)
    }
}

/// 每个分量独立映射: 选中为 255, 未选中为 0. 因此只选中红色分量的像素显示为红色.
impl ImgWriteVis for Mask3d {
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let (h, w, _) = self.shape();
        save_rgb(path, (h, w), self.array_view().iter().map(|&m| pretty(m)))
    }
}

/// 每个分量独立存储为 `1`/`0`.
impl ImgWriteRaw for Mask3d {
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let (h, w, _) = self.shape();
        save_rgb(path, (h, w), self.array_view().iter().map(|&m| u8::from(m)))
    }
}
