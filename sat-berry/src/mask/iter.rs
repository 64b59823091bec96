use crate::Idx2d;

/// 行优先的二维索引迭代器.
///
/// 内部只记录一个线性游标 `[front, back)`, 每次按宽度拆分为 `(行, 列)`.
/// 因此剩余长度总是精确的, 也可以从尾部反向迭代.
#[derive(Debug, Clone)]
pub struct PosIter {
    front: usize,
    back: usize,
    width: usize,
}

impl PosIter {
    /// 遍历形状 `(h, w)` 内的所有索引.
    #[inline]
    pub fn new((h, w): Idx2d) -> Self {
        Self {
            front: 0,
            back: h.saturating_mul(w),
            width: w,
        }
    }

    /// 只遍历主对角线 `(i, i)`, `i < min(h, w)`.
    #[inline]
    pub fn diagonal((h, w): Idx2d) -> impl ExactSizeIterator<Item = Idx2d> {
        (0..h.min(w)).map(|i| (i, i))
    }

    #[inline]
    fn split(&self, linear: usize) -> Idx2d {
        (linear / self.width, linear % self.width)
    }
}

impl Iterator for PosIter {
    type Item = Idx2d;

    fn next(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.front += 1;
            self.split(self.front - 1)
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for PosIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.back -= 1;
            self.split(self.back)
        })
    }
}

impl ExactSizeIterator for PosIter {}
