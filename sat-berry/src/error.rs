//! 运行时错误.

use std::fmt::{Display, Formatter};

use crate::Idx3d;

/// 掩码构建、组合与赋值的运行时错误.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// 通道索引越界. 合法值为 0, 1, 2.
    ChannelOutOfRange(usize),

    /// 掩码形状与目标形状不一致.
    ///
    /// 第一个参数为期望形状, 第二个参数为实际形状 (均以 `Vec` 存储, 以兼容二维和三维).
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// 索引越界. 参数为越界的 (行, 列, 通道) 索引.
    IndexOutOfBounds(Idx3d),

    /// 组合了零个掩码.
    EmptyCombination,
}

impl Display for MaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChannelOutOfRange(c) => write!(f, "channel index `{c}` out of range 0..3"),
            Self::ShapeMismatch(expected, found) => {
                write!(f, "shape mismatch: expected {expected:?}, found {found:?}")
            }
            Self::IndexOutOfBounds(idx) => write!(f, "index {idx:?} out of bounds"),
            Self::EmptyCombination => f.write_str("cannot combine an empty set of masks"),
        }
    }
}

impl std::error::Error for MaskError {}

/// 打开卫星图像错误.
#[derive(Debug)]
pub enum OpenImageError {
    /// 图像解码错误.
    Image(image::ImageError),

    /// 读取 npy 文件错误.
    Npy(ndarray_npy::ReadNpyError),

    /// 数据不是三通道. 参数为实际形状.
    NotThreeChannel(Vec<usize>),
}

impl Display for OpenImageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image(e) => write!(f, "failed to decode image: {e}"),
            Self::Npy(e) => write!(f, "failed to read npy: {e}"),
            Self::NotThreeChannel(sh) => write!(f, "expected (H, W, 3) data, found {sh:?}"),
        }
    }
}

impl std::error::Error for OpenImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            Self::Npy(e) => Some(e),
            Self::NotThreeChannel(_) => None,
        }
    }
}

impl From<image::ImageError> for OpenImageError {
    fn from(value: image::ImageError) -> Self {
        Self::Image(value)
    }
}

impl From<ndarray_npy::ReadNpyError> for OpenImageError {
    fn from(value: ndarray_npy::ReadNpyError) -> Self {
        Self::Npy(value)
    }
}
