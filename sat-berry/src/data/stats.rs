//! 图像的基本统计信息.

use super::SatImage;
use crate::consts::{Channel, CHANNELS};
use crate::Idx3d;
use itertools::izip;

/// 单个通道的统计量.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChannelStats {
    /// 最小值. 空图像时为 `u8::MAX`.
    pub min: u8,

    /// 最大值. 空图像时为 `u8::MIN`.
    pub max: u8,

    /// 平均值. 空图像时为 NaN.
    pub mean: f64,
}

/// 图像的基本统计信息: 形状, 分量个数, 全局与逐通道的最值和均值.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageStats {
    /// 形状 (高, 宽, 通道).
    pub shape: Idx3d,

    /// 分量个数.
    pub size: usize,

    /// 全部分量的最小值.
    pub min: u8,

    /// 全部分量的最大值.
    pub max: u8,

    /// 全部分量的平均值.
    pub mean: f64,

    /// 按 [`Channel::ALL`] 顺序排列的逐通道统计量.
    pub channels: [ChannelStats; CHANNELS],
}

impl ImageStats {
    /// 获取 `channel` 的统计量.
    #[inline]
    pub fn channel(&self, channel: Channel) -> &ChannelStats {
        &self.channels[channel.index()]
    }
}

impl SatImage {
    /// 单遍扫描, 计算基本统计信息.
    pub fn stats(&self) -> ImageStats {
        let mut min = [u8::MAX; CHANNELS];
        let mut max = [u8::MIN; CHANNELS];
        let mut sum = [0u64; CHANNELS];

        let [r, g, b] = Channel::ALL.map(|c| self.channel(c));
        for (&vr, &vg, &vb) in izip!(r.iter(), g.iter(), b.iter()) {
            for (k, v) in [vr, vg, vb].into_iter().enumerate() {
                min[k] = min[k].min(v);
                max[k] = max[k].max(v);
                sum[k] += v as u64;
            }
        }

        let pixels = (self.height() * self.width()) as f64;
        let channels: [ChannelStats; CHANNELS] = std::array::from_fn(|k| ChannelStats {
            min: min[k],
            max: max[k],
            mean: sum[k] as f64 / pixels,
        });
        let total: u64 = sum.iter().sum();

        ImageStats {
            shape: self.shape(),
            size: self.size(),
            min: min.into_iter().min().unwrap_or(u8::MAX),
            max: max.into_iter().max().unwrap_or(u8::MIN),
            mean: total as f64 / self.size() as f64,
            channels,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::consts::Channel;
    use crate::SatImage;
    use ndarray::Array3;

    #[test]
    fn test_stats() {
        let data = Array3::from_shape_fn((2, 3, 3), |(r, c, k)| (10 * k + 3 * r + c) as u8);
        let s = SatImage::from_array(data).unwrap().stats();
        assert_eq!(s.shape, (2, 3, 3));
        assert_eq!(s.size, 18);
        assert_eq!((s.min, s.max), (0, 25));

        let red = s.channel(Channel::Red);
        assert_eq!((red.min, red.max), (0, 5));
        assert!((red.mean - 2.5).abs() < 1e-12);
        let blue = s.channel(Channel::Blue);
        assert_eq!((blue.min, blue.max), (20, 25));
        assert!((s.mean - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_stats_empty() {
        let s = SatImage::filled((0, 4), 9).stats();
        assert_eq!(s.size, 0);
        assert!(s.mean.is_nan());
        assert_eq!(s.min, u8::MAX);
    }
}
