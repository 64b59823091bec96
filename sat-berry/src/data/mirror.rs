//! 图像镜像. 用于备份和复原卫星图像.

use super::SatImage;
use crate::Idx3d;

/// 一个拥有所有权的卫星图像的不透明镜像.
/// 用于保存一幅图像的原始值, 并在每次变换之前恢复.
///
/// 注意该结构是被设计来 **快速** 回填原数据的, 因此并不压缩原数据.
#[derive(Clone, Debug)]
pub struct ImageMirror {
    data: Vec<u8>,
    sh: Idx3d,
}

impl From<&SatImage> for ImageMirror {
    fn from(value: &SatImage) -> Self {
        Self {
            data: value.data().iter().copied().collect(),
            sh: value.shape(),
        }
    }
}

impl ImageMirror {
    /// 镜像对应图像的形状.
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.sh
    }

    /// 从镜像重建一幅新的图像.
    pub fn restore(&self) -> SatImage {
        let (h, w, _) = self.sh;
        let mut img = SatImage::filled((h, w), 0);
        img.resume(self);
        img
    }
}

impl SatImage {
    /// 获取拥有所有权的镜像, 供以后可能的恢复.
    #[inline]
    pub fn mirror(&self) -> ImageMirror {
        self.into()
    }

    /// 用 `mirror` 覆写原本 `self` 的内容.
    ///
    /// 如果 `mirror` 形状与 `self.shape()` 不符, 则程序 panic.
    pub fn resume(&mut self, mirror: &ImageMirror) {
        assert_eq!(self.shape(), mirror.sh, "镜像形状不符");
        for (r, w) in mirror.data.iter().zip(self.data_mut().iter_mut()) {
            *w = *r;
        }
    }

    /// 从镜像重建. 同 [`ImageMirror::restore`].
    #[inline]
    pub fn from_mirror(mirror: &ImageMirror) -> Self {
        mirror.restore()
    }
}
