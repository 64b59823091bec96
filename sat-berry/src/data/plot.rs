//! 图片展示模块, 主要用于调试.
//!
//! # 注意
//!
//! 需要 `plot` feature.

use crate::consts::gray::pretty;
use crate::mask::Mask2d;
use crate::{Idx2d, SatImage};
use opencv::core::{Scalar, Vec3b, CV_8UC1, CV_8UC3};
use opencv::highgui::{imshow, wait_key};
use opencv::prelude::{Mat, MatTrait, MatTraitConst};
use std::time::Duration;

/// 表明一个可以在窗口中可视化的对象.
pub trait ImgDisplay {
    /// 展示对象.
    fn show(&self) -> opencv::Result<()>;

    /// 同 `show()`, 但在之后自动等待一次用户按键输入.
    fn show_and_wait(&self) -> opencv::Result<i32> {
        self.show()?;
        wait_key(0)
    }

    /// 同 `show()`, 但在之后自动等待给定时间.
    fn show_and_wait_for(&self, d: Duration) -> opencv::Result<i32> {
        self.show()?;
        let ms = d.as_millis().min(i32::MAX as u128);
        wait_key(ms as i32)
    }
}

/// 创建 `(h, w)` 分辨率、全零的矩阵.
fn zeroed_mat((h, w): Idx2d, typ: i32) -> opencv::Result<Mat> {
    Mat::new_rows_cols_with_default(h as i32, w as i32, typ, Scalar::all(0.0))
}

/// 以 RGB 图像展示. opencv 按 BGR 解释像素, 因此需要交换红蓝通道.
impl ImgDisplay for SatImage {
    fn show(&self) -> opencv::Result<()> {
        let (h, w) = self.plane_shape();
        let mut mat = zeroed_mat((h, w), CV_8UC3)?;
        for r in 0..h {
            for c in 0..w {
                let [red, green, blue] = self.pixel((r, c)).unwrap_or_default();
                *mat.at_2d_mut::<Vec3b>(r as i32, c as i32)? = Vec3b::from([blue, green, red]);
            }
        }
        imshow("Image", &mat)
    }
}

/// 选中的像素为白色, 未选中的像素为黑色.
impl ImgDisplay for Mask2d {
    fn show(&self) -> opencv::Result<()> {
        let mut mat = zeroed_mat(self.shape(), CV_8UC1)?;
        for ((r, c), &m) in self.array_view().indexed_iter() {
            *mat.at_2d_mut::<u8>(r as i32, c as i32)? = pretty(m);
        }
        imshow("Image", &mat)
    }
}
