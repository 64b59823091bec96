//! 布尔掩码.
//!
//! 掩码是与其索引对象形状相同的布尔数组. 二维掩码 [`Mask2d`] 的形状为 `(H, W)`,
//! 对应逐像素选择; 三维掩码 [`Mask3d`] 的形状为 `(H, W, 3)`, 对应逐分量选择.
//!
//! 所有组合操作都要求参与的掩码形状完全一致, 否则返回 [`MaskError::ShapeMismatch`].

mod compact;
mod disc;
mod iter;
mod predicate;

pub use compact::CompactMask;
pub use disc::Disc;
pub use iter::PosIter;
pub use predicate::{Cmp, Threshold};

pub(crate) use predicate::value_mask as predicate_value_mask;

use crate::consts::{Channel, CHANNELS};
use crate::{Idx2d, Idx3d, MaskError};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis, Zip};
use ndarray_npy::{write_npy, WriteNpyError};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 二维 (逐像素) 布尔掩码, 形状为 `(H, W)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask2d {
    data: Array2<bool>,
}

/// 三维 (逐分量) 布尔掩码, 形状为 `(H, W, 3)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask3d {
    data: Array3<bool>,
}

/// 掩码共用方法集合.
macro_rules! impl_mask_common {
    ($mask: ty, $array: ty, $view: ty, $idx: ty) => {
        /// 共用方法集合.
        impl $mask {
            /// 直接从布尔数组初始化.
            #[inline]
            pub fn from_array(data: $array) -> Self {
                Self { data }
            }

            /// 创建给定形状、所有位置都为 `value` 的掩码.
            #[inline]
            pub fn filled(shape: $idx, value: bool) -> Self {
                Self {
                    data: <$array>::from_elem(shape, value),
                }
            }

            /// 获得底层数据的一份不可变 shallow copy.
            #[inline]
            pub fn array_view(&self) -> $view {
                self.data.view()
            }

            /// 直接获得底层数据.
            #[inline]
            pub fn into_raw(self) -> $array {
                self.data
            }

            /// 获取给定位置的值. 越界时返回 `None`.
            #[inline]
            pub fn get(&self, pos: $idx) -> Option<bool> {
                self.data.get(pos).copied()
            }

            /// 掩码的元素个数.
            #[inline]
            pub fn size(&self) -> usize {
                self.data.len()
            }

            /// 被选中 (值为 `true`) 的元素个数.
            #[inline]
            pub fn count(&self) -> usize {
                self.data.iter().filter(|&&m| m).count()
            }

            /// 是否没有任何元素被选中?
            #[inline]
            pub fn is_none_selected(&self) -> bool {
                !self.data.iter().any(|&m| m)
            }

            /// 是否全部元素都被选中?
            #[inline]
            pub fn is_all_selected(&self) -> bool {
                self.data.iter().all(|&m| m)
            }

            /// 逐元素取反.
            pub fn not(&self) -> Self {
                Self {
                    data: self.data.mapv(|m| !m),
                }
            }

            /// 逐元素 AND. 形状不一致时返回 `Err`.
            pub fn and(&self, other: &Self) -> Result<Self, MaskError> {
                self.check_same_shape(other)?;
                let mut data = self.data.clone();
                Zip::from(&mut data)
                    .and(&other.data)
                    .for_each(|a, &b| *a &= b);
                Ok(Self { data })
            }

            /// 逐元素 OR. 形状不一致时返回 `Err`.
            pub fn or(&self, other: &Self) -> Result<Self, MaskError> {
                self.check_same_shape(other)?;
                let mut data = self.data.clone();
                Zip::from(&mut data)
                    .and(&other.data)
                    .for_each(|a, &b| *a |= b);
                Ok(Self { data })
            }

            /// 对 `masks` 中的 **所有** 掩码做逐元素 AND.
            ///
            /// # 返回值
            ///
            /// - `masks` 为空时返回 `Err(MaskError::EmptyCombination)`;
            /// - 任意两个掩码形状不一致时返回 `Err(MaskError::ShapeMismatch)`;
            /// - 否则返回 `Ok`, 其中某位置为 `true` 当且仅当它在每个掩码中都为 `true`.
            pub fn all_of<'m, I>(masks: I) -> Result<Self, MaskError>
            where
                I: IntoIterator<Item = &'m Self>,
            {
                let mut it = masks.into_iter();
                let first = it.next().ok_or(MaskError::EmptyCombination)?;
                let mut data = first.data.clone();
                for m in it {
                    first.check_same_shape(m)?;
                    Zip::from(&mut data).and(&m.data).for_each(|a, &b| *a &= b);
                }
                Ok(Self { data })
            }

            /// 对 `masks` 中的所有掩码做逐元素 OR. 错误规则同 [`Self::all_of`].
            pub fn any_of<'m, I>(masks: I) -> Result<Self, MaskError>
            where
                I: IntoIterator<Item = &'m Self>,
            {
                let mut it = masks.into_iter();
                let first = it.next().ok_or(MaskError::EmptyCombination)?;
                let mut data = first.data.clone();
                for m in it {
                    first.check_same_shape(m)?;
                    Zip::from(&mut data).and(&m.data).for_each(|a, &b| *a |= b);
                }
                Ok(Self { data })
            }

            /// `self` 选中的每个位置是否都被 `other` 选中?
            pub fn is_subset_of(&self, other: &Self) -> Result<bool, MaskError> {
                self.check_same_shape(other)?;
                Ok(Zip::from(&self.data)
                    .and(&other.data)
                    .all(|&a, &b| !a || b))
            }

            /// 将掩码按原样 (`bool` 数组) 存储为 npy 文件.
            pub fn save_npy<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteNpyError> {
                write_npy(path, &self.data)
            }

            /// 检查两个掩码形状是否一致.
            #[inline]
            fn check_same_shape(&self, other: &Self) -> Result<(), MaskError> {
                if self.data.shape() == other.data.shape() {
                    Ok(())
                } else {
                    Err(MaskError::ShapeMismatch(
                        self.data.shape().to_vec(),
                        other.data.shape().to_vec(),
                    ))
                }
            }
        }
    };
}

impl_mask_common!(Mask2d, Array2<bool>, ArrayView2<'_, bool>, Idx2d);
impl_mask_common!(Mask3d, Array3<bool>, ArrayView3<'_, bool>, Idx3d);

impl Mask2d {
    /// 由形状和逐位置谓词创建掩码.
    #[inline]
    pub fn from_fn<F: FnMut(Idx2d) -> bool>(shape: Idx2d, f: F) -> Self {
        Self {
            data: Array2::from_shape_fn(shape, f),
        }
    }

    /// 掩码的形状 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }

    /// 掩码的高.
    #[inline]
    pub fn height(&self) -> usize {
        self.shape().0
    }

    /// 掩码的宽.
    #[inline]
    pub fn width(&self) -> usize {
        self.shape().1
    }

    /// 以行优先规则收集所有被选中位置的索引.
    pub fn true_positions(&self) -> Vec<Idx2d> {
        PosIter::new(self.shape())
            .filter(|pos| self.data[*pos])
            .collect()
    }

    /// 沿通道方向广播为三维掩码: 被选中像素的三个分量全部被选中.
    pub fn broadcast_channels(&self) -> Mask3d {
        let (h, w) = self.shape();
        Mask3d {
            data: Array3::from_shape_fn((h, w, CHANNELS), |(r, c, _)| self.data[(r, c)]),
        }
    }
}

impl Mask3d {
    /// 掩码的形状 (高, 宽, 通道).
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.data.dim()
    }

    /// 获取第 `channel` 个通道上的二维掩码.
    #[inline]
    pub fn channel(&self, channel: Channel) -> Mask2d {
        Mask2d::from_array(self.data.index_axis(Axis(2), channel.index()).to_owned())
    }

    /// 在通道方向上做 OR 归约: 某像素被选中当且仅当它至少有一个分量被选中.
    pub fn any_channel(&self) -> Mask2d {
        let (h, w, _) = self.shape();
        Mask2d::from_fn((h, w), |(r, c)| {
            self.data.slice(ndarray::s![r, c, ..]).iter().any(|&m| m)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Mask2d, Mask3d};
    use crate::consts::Channel;
    use crate::MaskError;
    use ndarray::{array, Array3};

    fn checker() -> Mask2d {
        Mask2d::from_fn((3, 4), |(r, c)| (r + c) % 2 == 0)
    }

    #[test]
    fn test_basic_counts() {
        let m = checker();
        assert_eq!(m.size(), 12);
        assert_eq!(m.count(), 6);
        assert_eq!(m.not().count(), 6);
        assert!(Mask2d::filled((2, 2), false).is_none_selected());
        assert!(Mask2d::filled((2, 2), true).is_all_selected());
        assert_eq!(m.get((0, 0)), Some(true));
        assert_eq!(m.get((3, 0)), None);
    }

    #[test]
    fn test_and_or() {
        let a = Mask2d::from_array(array![[true, true], [false, false]]);
        let b = Mask2d::from_array(array![[true, false], [true, false]]);
        assert_eq!(
            a.and(&b).unwrap(),
            Mask2d::from_array(array![[true, false], [false, false]])
        );
        assert_eq!(
            a.or(&b).unwrap(),
            Mask2d::from_array(array![[true, true], [true, false]])
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Mask2d::filled((2, 3), true);
        let b = Mask2d::filled((3, 2), true);
        assert_eq!(
            a.and(&b).unwrap_err(),
            MaskError::ShapeMismatch(vec![2, 3], vec![3, 2])
        );
        assert!(a.is_subset_of(&b).is_err());
        assert!(Mask2d::all_of([&a, &a, &b]).is_err());
    }

    /// 三个掩码组合时, 第三个掩码同样必须生效.
    #[test]
    fn test_all_of_uses_every_mask() {
        let a = Mask2d::from_array(array![[true, true, true, false]]);
        let b = Mask2d::from_array(array![[true, true, false, true]]);
        let c = Mask2d::from_array(array![[true, false, true, true]]);

        let all = Mask2d::all_of([&a, &b, &c]).unwrap();
        assert_eq!(all, Mask2d::from_array(array![[true, false, false, false]]));
        assert_ne!(all, a.and(&b).unwrap());

        let any = Mask2d::any_of([&a, &b, &c]).unwrap();
        assert!(any.is_all_selected());
    }

    #[test]
    fn test_all_of_empty() {
        let empty: [&Mask2d; 0] = [];
        assert_eq!(Mask2d::all_of(empty).unwrap_err(), MaskError::EmptyCombination);
    }

    #[test]
    fn test_subset() {
        let m = checker();
        let all = Mask2d::filled(m.shape(), true);
        assert!(m.is_subset_of(&all).unwrap());
        assert!(!all.is_subset_of(&m).unwrap());
        assert!(m.and(&m.not()).unwrap().is_subset_of(&m).unwrap());
    }

    #[test]
    fn test_true_positions() {
        let m = Mask2d::from_array(array![[false, true], [true, false]]);
        assert_eq!(m.true_positions(), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_broadcast_and_reduce() {
        let m = checker();
        let m3 = m.broadcast_channels();
        assert_eq!(m3.shape(), (3, 4, 3));
        assert_eq!(m3.count(), m.count() * 3);
        for c in Channel::ALL {
            assert_eq!(m3.channel(c), m);
        }
        assert_eq!(m3.any_channel(), m);

        let mut raw = Array3::from_elem((1, 2, 3), false);
        raw[(0, 1, 2)] = true;
        let only_blue = Mask3d::from_array(raw);
        assert_eq!(
            only_blue.any_channel(),
            Mask2d::from_array(array![[false, true]])
        );
        assert!(only_blue.channel(Channel::Red).is_none_selected());
    }
}
