use std::ops::{Index, IndexMut, Range};
use std::path::Path;

use log::debug;
use ndarray::{s, Array3, ArrayView, ArrayView2, ArrayViewMut, Axis, Ix3, Zip};
use ndarray_npy::{read_npy, write_npy, WriteNpyError};

use crate::consts::{Channel, CHANNELS};
use crate::mask::{predicate_value_mask, Cmp, Mask2d, Mask3d, PosIter, Threshold};
use crate::{Idx2d, Idx3d, MaskError, OpenImageError};

mod mirror;
mod save;
mod stats;

pub use mirror::ImageMirror;
pub use save::{ImgWriteRaw, ImgWriteVis};
pub use stats::{ChannelStats, ImageStats};

cfg_if::cfg_if! {
    if #[cfg(feature = "plot")] {
        mod plot;

        pub use plot::ImgDisplay;
    }
}

/// 三通道卫星图像, 以 `(H, W, 3)` 的 `u8` 数组存储.
///
/// 形状在构造后固定: 本结构的所有方法都只修改像素值.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatImage {
    data: Array3<u8>,
}

impl Index<Idx3d> for SatImage {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx3d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx3d> for SatImage {
    #[inline]
    fn index_mut(&mut self, index: Idx3d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl SatImage {
    /// 打开并解码图像文件, 统一转换为 8-bit RGB. `path` 为图像文件的本地路径.
    /// 如果打开成功, 则返回 `Ok(Self)`, 否则返回 `Err`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, OpenImageError> {
        let rgb = image::open(path.as_ref())?.into_rgb8();
        let (w, h) = rgb.dimensions();
        debug!("decoded {:?}: {w}x{h}", path.as_ref());

        // `RgbImage` 的底层缓冲区即为行优先的 (H, W, 3) 布局.
        let data = Array3::from_shape_vec((h as usize, w as usize, CHANNELS), rgb.into_raw())
            .map_err(|_| OpenImageError::NotThreeChannel(vec![h as usize, w as usize]))?;
        Ok(Self { data })
    }

    /// 读取按原样存储的 npy 文件. 数据必须是形状为 `(H, W, 3)` 的 `u8` 数组.
    pub fn open_npy<P: AsRef<Path>>(path: P) -> Result<Self, OpenImageError> {
        let data: Array3<u8> = read_npy(path)?;
        Self::from_array(data)
    }

    /// 从裸数据直接创建. 第三维长度必须为 3, 否则返回 `Err`.
    pub fn from_array(data: Array3<u8>) -> Result<Self, OpenImageError> {
        match data.dim() {
            (_, _, CHANNELS) => Ok(Self { data }),
            _ => Err(OpenImageError::NotThreeChannel(data.shape().to_vec())),
        }
    }

    /// 创建 `(h, w, 3)`、所有分量都为 `value` 的图像.
    #[inline]
    pub fn filled((h, w): Idx2d, value: u8) -> Self {
        Self {
            data: Array3::from_elem((h, w, CHANNELS), value),
        }
    }

    /// 将图像按原样存储为 npy 文件.
    pub fn save_npy<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteNpyError> {
        write_npy(path, &self.data)
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView<'_, u8, Ix3> {
        self.data.view()
    }

    /// 获得数据的一份可变 shallow copy.
    #[inline]
    pub fn data_mut(&mut self) -> ArrayViewMut<'_, u8, Ix3> {
        self.data.view_mut()
    }

    /// 直接获得底层数据.
    #[inline]
    pub fn into_raw(self) -> Array3<u8> {
        self.data
    }

    /// 图像的形状 (高, 宽, 通道).
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.data.dim()
    }

    /// 图像的平面形状 (高, 宽).
    #[inline]
    pub fn plane_shape(&self) -> Idx2d {
        let (h, w, _) = self.shape();
        (h, w)
    }

    /// 图像的高.
    #[inline]
    pub fn height(&self) -> usize {
        self.shape().0
    }

    /// 图像的宽.
    #[inline]
    pub fn width(&self) -> usize {
        self.shape().1
    }

    /// 数据的分量个数, 即 `H * W * 3`.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 获取第 `channel` 个通道的二维视图.
    #[inline]
    pub fn channel(&self, channel: Channel) -> ArrayView2<'_, u8> {
        self.data.index_axis(Axis(2), channel.index())
    }

    /// 获取给定位置 (行, 列) 的 RGB 像素. 越界时返回 `None`.
    pub fn pixel(&self, (r, c): Idx2d) -> Option<[u8; 3]> {
        if r < self.height() && c < self.width() {
            Some([
                self.data[(r, c, 0)],
                self.data[(r, c, 1)],
                self.data[(r, c, 2)],
            ])
        } else {
            None
        }
    }

    /// 获取给定位置 (行, 列, 通道) 的分量. 越界时返回 `None`.
    #[inline]
    pub fn value(&self, pos: Idx3d) -> Option<u8> {
        self.data.get(pos).copied()
    }

    /// 将位置 `pos` 的三个分量全部设为 `value`. 越界时返回 `Err`.
    pub fn set_pixel(&mut self, pos: Idx2d, value: u8) -> Result<(), MaskError> {
        self.set_pixel_rgb(pos, [value; CHANNELS])
    }

    /// 将位置 `pos` 的三个分量分别设为 `rgb`. 越界时返回 `Err`.
    pub fn set_pixel_rgb(&mut self, (r, c): Idx2d, rgb: [u8; 3]) -> Result<(), MaskError> {
        if r >= self.height() || c >= self.width() {
            return Err(MaskError::IndexOutOfBounds((r, c, 0)));
        }
        self.data
            .slice_mut(s![r, c, ..])
            .iter_mut()
            .zip(rgb)
            .for_each(|(slot, v)| *slot = v);
        Ok(())
    }

    /// 将 `rows` 行范围内所有像素的所有分量设为 `value`.
    ///
    /// 行范围按切片语义截断到图像内部, 因此越界部分被忽略.
    /// 返回实际被修改的行数.
    pub fn fill_rows(&mut self, rows: Range<usize>, value: u8) -> usize {
        let rows = self.clamp_rows(rows);
        let n = rows.len();
        self.data.slice_mut(s![rows, .., ..]).fill(value);
        n
    }

    /// 将 `rows` 行范围内所有像素的第 `channel` 个分量设为 `value`.
    ///
    /// 截断规则同 [`Self::fill_rows`]. 返回实际被修改的行数.
    pub fn fill_rows_channel(&mut self, rows: Range<usize>, channel: Channel, value: u8) -> usize {
        let rows = self.clamp_rows(rows);
        let n = rows.len();
        self.data
            .slice_mut(s![rows, .., channel.index()])
            .fill(value);
        n
    }

    /// 将主对角线 `(i, i)` (`i` 取遍所有行) 上像素的所有分量设为 `value`.
    ///
    /// 要求图像的宽不小于高, 否则返回 `Err` 且图像不被修改.
    pub fn fill_diagonal(&mut self, value: u8) -> Result<usize, MaskError> {
        let (h, w) = self.plane_shape();
        if h > w {
            return Err(MaskError::IndexOutOfBounds((w, w, 0)));
        }
        for pos in PosIter::diagonal((h, w)) {
            self.set_pixel(pos, value)?;
        }
        Ok(h)
    }

    /// 单通道阈值掩码: `M[r, c] = self[r, c, channel] OP t`.
    #[inline]
    pub fn channel_mask(&self, channel: Channel, cmp: Cmp, t: u8) -> Mask2d {
        Threshold::new(channel, cmp, t).mask(self)
    }

    /// 全分量阈值掩码: `M[r, c, k] = self[r, c, k] OP t`.
    #[inline]
    pub fn value_mask(&self, cmp: Cmp, t: u8) -> Mask3d {
        predicate_value_mask(self, cmp, t)
    }

    /// 掩码赋值: 将 `mask` 选中的每个像素的 **全部三个** 分量设为 `value`.
    ///
    /// `mask` 形状必须为 `(H, W)`, 否则返回 `Err`, 且图像不被修改.
    /// 成功时返回被选中的像素个数.
    pub fn fill_where(&mut self, mask: &Mask2d, value: u8) -> Result<usize, MaskError> {
        self.fill_pixels_where(mask, [value; CHANNELS])
    }

    /// 掩码赋值: 将 `mask` 选中的每个像素的三个分量分别设为 `rgb`.
    ///
    /// 错误规则同 [`Self::fill_where`].
    pub fn fill_pixels_where(&mut self, mask: &Mask2d, rgb: [u8; 3]) -> Result<usize, MaskError> {
        self.check_plane(mask)?;
        let mut cnt = 0usize;
        Zip::from(self.data.lanes_mut(Axis(2)))
            .and(&mask.array_view())
            .for_each(|mut px, &m| {
                if m {
                    cnt += 1;
                    px.iter_mut().zip(rgb).for_each(|(slot, v)| *slot = v);
                }
            });
        debug!("filled {cnt} pixels with {rgb:?}");
        Ok(cnt)
    }

    /// 逐分量掩码赋值: 将 `mask` 选中的每个分量设为 `value`.
    ///
    /// `mask` 形状必须为 `(H, W, 3)`, 否则返回 `Err`, 且图像不被修改.
    /// 成功时返回被选中的分量个数.
    pub fn fill_where_3d(&mut self, mask: &Mask3d, value: u8) -> Result<usize, MaskError> {
        if mask.shape() != self.shape() {
            return Err(MaskError::ShapeMismatch(
                self.data.shape().to_vec(),
                mask.array_view().shape().to_vec(),
            ));
        }
        let mut cnt = 0usize;
        Zip::from(&mut self.data)
            .and(&mask.array_view())
            .for_each(|slot, &m| {
                if m {
                    cnt += 1;
                    *slot = value;
                }
            });
        debug!("filled {cnt} values with {value}");
        Ok(cnt)
    }

    /// 检查二维掩码与图像平面形状是否一致.
    #[inline]
    fn check_plane(&self, mask: &Mask2d) -> Result<(), MaskError> {
        if mask.shape() == self.plane_shape() {
            Ok(())
        } else {
            let (h, w) = self.plane_shape();
            let (mh, mw) = mask.shape();
            Err(MaskError::ShapeMismatch(vec![h, w], vec![mh, mw]))
        }
    }

    /// 将 `rows` 截断到 `0..H` 内. 若起点不小于终点则得到空范围.
    #[inline]
    fn clamp_rows(&self, rows: Range<usize>) -> Range<usize> {
        let h = self.height();
        let end = rows.end.min(h);
        rows.start.min(end)..end
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use std::sync::atomic::{AtomicUsize, Ordering};
    }
}

/// 并发操作部分
#[cfg(feature = "rayon")]
impl SatImage {
    /// 同 [`Self::channel_mask`], 但借助 `rayon` 并行求值.
    #[inline]
    pub fn par_channel_mask(&self, channel: Channel, cmp: Cmp, t: u8) -> Mask2d {
        Threshold::new(channel, cmp, t).par_mask(self)
    }

    /// 同 [`Self::fill_where`], 但借助 `rayon` 并行地逐像素赋值.
    pub fn par_fill_where(&mut self, mask: &Mask2d, value: u8) -> Result<usize, MaskError> {
        self.check_plane(mask)?;
        let cnt = AtomicUsize::new(0);
        Zip::from(self.data.lanes_mut(Axis(2)))
            .and(&mask.array_view())
            .par_for_each(|mut px, &m| {
                if m {
                    cnt.fetch_add(1, Ordering::Relaxed);
                    px.fill(value);
                }
            });
        Ok(cnt.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::SatImage;
    use crate::consts::Channel;
    use crate::mask::{Cmp, Disc, Mask2d, Mask3d};
    use crate::{MaskError, OpenImageError};
    use ndarray::{array, Array2, Array3};

    /// 4x4 图像, 红色通道为给定值, 绿色和蓝色通道为固定值.
    fn concrete() -> (SatImage, Array2<u8>) {
        let red = array![
            [100, 200, 50, 250],
            [10, 210, 90, 40],
            [150, 149, 151, 0],
            [255, 130, 180, 160]
        ];
        let img = SatImage::from_array(Array3::from_shape_fn((4, 4, 3), |(r, c, k)| match k {
            0 => red[(r, c)],
            1 => 77,
            _ => 222,
        }))
        .unwrap();
        (img, red)
    }

    /// 一幅各像素各不相同的图像.
    fn gradient((h, w): (usize, usize)) -> SatImage {
        SatImage::from_array(Array3::from_shape_fn((h, w, 3), |(r, c, k)| {
            ((r * 31 + c * 17 + k * 101) % 256) as u8
        }))
        .unwrap()
    }

    #[test]
    fn test_from_array_rejects_non_rgb() {
        let err = SatImage::from_array(Array3::zeros((2, 2, 4))).unwrap_err();
        assert!(matches!(err, OpenImageError::NotThreeChannel(sh) if sh == vec![2, 2, 4]));
    }

    /// 阈值 `< 150` 的像素全部置零, 其余像素保持不变.
    #[test]
    fn test_threshold_zero_concrete() {
        let (mut img, red) = concrete();
        let mask = img.channel_mask(Channel::Red, Cmp::Lt, 150);
        assert_eq!(img.fill_where(&mask, 0).unwrap(), 8);

        let expected_red: Array2<u8> = array![
            [0, 200, 0, 250],
            [0, 210, 0, 0],
            [150, 0, 151, 0],
            [255, 0, 180, 160]
        ];
        assert_eq!(img.channel(Channel::Red), expected_red);
        for ((r, c), &v) in red.indexed_iter() {
            let want = if v < 150 { [0, 0, 0] } else { [v, 77, 222] };
            assert_eq!(img.pixel((r, c)), Some(want));
        }
        assert_eq!(img.shape(), (4, 4, 3));
    }

    #[test]
    fn test_fill_where_is_idempotent() {
        let mut once = gradient((9, 13));
        let mask = once.channel_mask(Channel::Green, Cmp::Gt, 120);
        once.fill_where(&mask, 255).unwrap();
        let mut twice = once.clone();
        twice.fill_where(&mask, 255).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fill_where_matches_broadcast() {
        let base = gradient((7, 11));
        let mask = base.channel_mask(Channel::Blue, Cmp::Le, 90);

        let mut by_2d = base.clone();
        let mut by_3d = base.clone();
        let n2 = by_2d.fill_where(&mask, 9).unwrap();
        let n3 = by_3d.fill_where_3d(&mask.broadcast_channels(), 9).unwrap();
        assert_eq!(by_2d, by_3d);
        assert_eq!(n2 * 3, n3);
    }

    #[test]
    fn test_fill_where_shape_mismatch_leaves_image() {
        let mut img = gradient((4, 5));
        let before = img.clone();
        let err = img.fill_where(&Mask2d::filled((5, 4), true), 0).unwrap_err();
        assert_eq!(err, MaskError::ShapeMismatch(vec![4, 5], vec![5, 4]));
        assert!(img
            .fill_where_3d(&Mask3d::filled((4, 5, 2), true), 0)
            .is_err());
        assert_eq!(img, before);
    }

    #[test]
    fn test_value_mask_low_values() {
        let mut img = gradient((6, 6));
        let original = img.clone();
        let low = img.value_mask(Cmp::Lt, 200);
        img.fill_where_3d(&low, 0).unwrap();
        for (after, &before) in img.data().iter().zip(original.data().iter()) {
            assert_eq!(*after, if before < 200 { 0 } else { before });
        }
    }

    #[test]
    fn test_fill_pixels_where_rgb() {
        let mut img = SatImage::filled((2, 3), 10);
        let mask = Mask2d::from_fn((2, 3), |(r, c)| r == 1 && c != 1);
        assert_eq!(img.fill_pixels_where(&mask, [1, 2, 3]).unwrap(), 2);
        assert_eq!(img.pixel((1, 0)), Some([1, 2, 3]));
        assert_eq!(img.pixel((1, 1)), Some([10, 10, 10]));
        assert_eq!(img.pixel((1, 2)), Some([1, 2, 3]));
    }

    /// 所有变换都保持形状.
    #[test]
    fn test_shape_preserved() {
        for shape in [(1, 1), (3, 8), (8, 3), (10, 10)] {
            let mut img = gradient(shape);
            let expected = img.shape();
            let disc = Disc::inscribed(shape);

            img.fill_where(&disc.outside_mask(shape), 0).unwrap();
            img.fill_where(&disc.upper_half_outside_mask(shape), 255).unwrap();
            let m = img.value_mask(Cmp::Ge, 128);
            img.fill_where_3d(&m, 1).unwrap();
            img.fill_rows(0..shape.0 / 2, 7);
            img.fill_rows_channel(1..100, Channel::Green, 3);
            let _ = img.fill_diagonal(255);
            assert_eq!(img.shape(), expected);
        }
    }

    #[test]
    fn test_pixel_access() {
        let mut img = gradient((3, 4));
        assert_eq!(img.pixel((3, 0)), None);
        assert_eq!(img.value((0, 0, 3)), None);

        img.set_pixel((2, 3), 0).unwrap();
        assert_eq!(img.pixel((2, 3)), Some([0, 0, 0]));
        assert_eq!(img[(2, 3, 1)], 0);
        assert_eq!(
            img.set_pixel((3, 0), 0).unwrap_err(),
            MaskError::IndexOutOfBounds((3, 0, 0))
        );
    }

    #[test]
    fn test_fill_rows_clamped() {
        let mut img = SatImage::filled((5, 2), 100);
        assert_eq!(img.fill_rows_channel(3..800, Channel::Green, 255), 2);
        assert_eq!(img.pixel((2, 0)), Some([100, 100, 100]));
        assert_eq!(img.pixel((3, 1)), Some([100, 255, 100]));
        assert_eq!(img.pixel((4, 0)), Some([100, 255, 100]));

        assert_eq!(img.fill_rows(200..800, 0), 0);
        assert_eq!(img.fill_rows(1..2, 0), 1);
        assert_eq!(img.pixel((1, 1)), Some([0, 0, 0]));
        assert_eq!(img.pixel((0, 1)), Some([100, 100, 100]));
    }

    #[test]
    fn test_fill_diagonal() {
        let mut img = SatImage::filled((3, 5), 0);
        assert_eq!(img.fill_diagonal(255).unwrap(), 3);
        for r in 0..3 {
            for c in 0..5 {
                let want = if r == c { 255 } else { 0 };
                assert_eq!(img.pixel((r, c)), Some([want; 3]));
            }
        }

        let mut tall = SatImage::filled((5, 3), 0);
        assert!(tall.fill_diagonal(255).is_err());
        assert_eq!(tall, SatImage::filled((5, 3), 0));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_par_matches_serial() {
        let base = gradient((33, 21));
        let m = base.channel_mask(Channel::Red, Cmp::Lt, 150);
        assert_eq!(base.par_channel_mask(Channel::Red, Cmp::Lt, 150), m);

        let mut serial = base.clone();
        let mut par = base.clone();
        let n = serial.fill_where(&m, 0).unwrap();
        assert_eq!(par.par_fill_where(&m, 0).unwrap(), n);
        assert_eq!(serial, par);
    }
}
