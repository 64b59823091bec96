#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 将三通道卫星图像 (WIFIRE 项目的 `sd-3layers` 格式) 载入为稠密的
//! `(H, W, 3)` 数组, 并提供像素谓词掩码、几何 (圆盘) 掩码、掩码组合以及掩码赋值等基础操作.
//!
//! 三个通道 Red, Green, Blue 分别被解释为高程 (altitude), 坡度 (slope) 和坡向 (aspect).
//!
//! # 注意
//!
//! 1. 所有变换都只修改像素值, 从不修改图像形状. 这是该 crate 唯一的不变式.
//! 2. 掩码与图像形状不一致时返回 `Err`, 且保证图像未被修改.
//! 3. 多数操作是单遍扫描, 复杂度为 `O(H * W)`.
//!
//! # 开发计划
//!
//! ### 通道阈值掩码 ✅
//!
//! 对单一通道施加 `<`, `<=`, `>`, `>=`, `==`, `!=` 比较, 获得二维掩码;
//! 对整幅图像施加比较, 获得三维掩码.
//!
//! 实现位于 `sat-berry/src/mask/predicate.rs`.
//!
//! ### 圆盘掩码 ✅
//!
//! 以图像中心为圆心, 高度的一半为半径的内切圆. 选择圆外的像素,
//! 或者进一步只选择上半部分的圆外像素.
//!
//! 实现位于 `sat-berry/src/mask/disc.rs`.
//!
//! ### 掩码组合 ✅
//!
//! 逐元素 AND / OR / NOT. 组合任意多个掩码时, **每一个** 掩码都会参与运算.
//!
//! ### 掩码赋值 ✅
//!
//! 二维掩码会作用于被选中位置的全部三个通道.
//!
//! 实现位于 `sat-berry/src/data/mod.rs`.
//!
//! ### 演示场景 ✅
//!
//! 每个场景都从原始图像的一份全新拷贝开始, 场景之间不共享状态.
//!
//! 实现位于 `sat-berry/src/scene`.
//!
//! ### 小功能 ✅
//!
//! 1. 提供 mirror type 以支持图像的备份与恢复. ✅
//! 2. 掩码的压缩存储. ✅
//! 3. npy 格式的读写. ✅

/// 二维索引 (行, 列), 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

/// 三维索引 (行, 列, 通道).
pub type Idx3d = (usize, usize, usize);

/// 高精度二维坐标. 圆盘的圆心不一定落在像素上.
type Idx2dF = (f64, f64);

mod error;

/// 卫星图像基础数据结构.
mod data;

pub use data::{ChannelStats, ImageMirror, ImageStats, ImgWriteRaw, ImgWriteVis, SatImage};

#[cfg(feature = "plot")]
pub use data::ImgDisplay;

pub use error::{MaskError, OpenImageError};

pub mod consts;

pub mod mask;

pub mod scene;

pub mod dataset;
pub mod prelude;
