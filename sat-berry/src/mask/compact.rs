//! 掩码的压缩存储.
//!
//! 先按行优先顺序把 8 个布尔值打包为 1 字节 (低位在前), 再用 zlib 压缩.

use super::Mask2d;
use crate::Idx2d;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use ndarray::Array2;
use std::io::{self, Read, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 压缩存储的 [`Mask2d`]; 不透明类型.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompactMask {
    /// 压缩的不透明字节流.
    buf: Vec<u8>,

    /// 形状.
    sh: Idx2d,
}

/// 将 `bits` 打包, 不足 8 位的尾部以 `false` 补齐.
fn pack<I: IntoIterator<Item = bool>>(bits: I, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len.div_ceil(8)];
    for (i, bit) in bits.into_iter().enumerate() {
        if bit {
            out[i / 8] |= 1 << (i % 8);
        }
    }
    out
}

impl Mask2d {
    /// 压缩掩码.
    pub fn compress(&self) -> io::Result<CompactMask> {
        let sh = self.shape();
        let packed = pack(self.array_view().iter().copied(), self.size());
        let mut e = ZlibEncoder::new(Vec::with_capacity(8), Compression::best());
        e.write_all(&packed)?;
        Ok(CompactMask { buf: e.finish()?, sh })
    }
}

impl CompactMask {
    /// 原掩码的形状.
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.sh
    }

    /// 压缩后的字节数.
    #[inline]
    pub fn compressed_len(&self) -> usize {
        self.buf.len()
    }

    /// 解压缩数据.
    ///
    /// 如果字节流损坏或长度与形状不符, 返回 `Err`.
    pub fn decompress(&self) -> io::Result<Mask2d> {
        let (h, w) = self.sh;
        let len = h.checked_mul(w).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, format!("shape {:?} overflows", self.sh))
        })?;
        let expected = len.div_ceil(8);

        // 最多多读 1 字节, 足以判断是否过长.
        let limit = u64::try_from(expected).map_or(u64::MAX, |n| n.saturating_add(1));
        let mut packed = Vec::new();
        ZlibDecoder::new(self.buf.as_slice())
            .take(limit)
            .read_to_end(&mut packed)?;
        if packed.len() != expected {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected {expected} packed bytes, found {}", packed.len()),
            ));
        }
        let bits: Vec<bool> = (0..len).map(|i| packed[i / 8] & (1 << (i % 8)) != 0).collect();
        Array2::from_shape_vec((h, w), bits)
            .map(Mask2d::from_array)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(feature = "serde")]
impl CompactMask {
    /// 以 bincode 格式序列化.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// 从 bincode 格式反序列化.
    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::{pack, CompactMask};
    use crate::mask::{Disc, Mask2d};
    use std::io;

    #[test]
    fn test_pack_bits() {
        let bits = [true, false, false, false, false, false, false, true, true];
        assert_eq!(pack(bits, bits.len()), vec![0b1000_0001, 0b0000_0001]);
        assert!(pack(std::iter::empty(), 0).is_empty());
    }

    #[test]
    fn test_compact_restores_mask() {
        let shape = (37, 53);
        let m = Disc::inscribed(shape).outside_mask(shape);
        let c = m.compress().unwrap();
        assert_eq!(c.shape(), shape);
        assert!(c.compressed_len() < m.size());
        assert_eq!(c.decompress().unwrap(), m);
    }

    #[test]
    fn test_compact_empty() {
        let m = Mask2d::filled((0, 5), false);
        assert_eq!(m.compress().unwrap().decompress().unwrap(), m);
    }

    /// 形状与字节流不符时解压失败, 包括宽高乘积溢出的情形.
    #[test]
    fn test_decompress_bad_shape() {
        let c = Mask2d::filled((1, 1), true).compress().unwrap();
        for sh in [(usize::MAX, 2), (usize::MAX / 2 + 1, usize::MAX), (40, 40)] {
            let forged = CompactMask {
                buf: c.buf.clone(),
                sh,
            };
            let e = forged.decompress().unwrap_err();
            assert_eq!(e.kind(), io::ErrorKind::InvalidData, "{sh:?}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_bytes_overflowing_shape() {
        let c = Mask2d::filled((1, 1), true).compress().unwrap();
        let forged = CompactMask {
            buf: c.buf.clone(),
            sh: (usize::MAX, usize::MAX),
        };
        let back = CompactMask::from_bytes(&forged.to_bytes().unwrap()).unwrap();
        assert_eq!(back.shape(), (usize::MAX, usize::MAX));
        assert!(back.decompress().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_compact_bincode() {
        let m = Mask2d::from_fn((5, 9), |(r, c)| r * c % 3 == 1);
        let c = m.compress().unwrap();
        let bytes = c.to_bytes().unwrap();
        let back = CompactMask::from_bytes(&bytes).unwrap();
        assert_eq!(back, c);
        assert_eq!(back.decompress().unwrap(), m);
    }
}
