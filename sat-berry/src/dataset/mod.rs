//! 数据集路径.
//!
//! 数据集默认存放在 `{用户主目录}/dataset` 下. WIFIRE 样例图像位于
//! `{用户主目录}/dataset/wifire/sd-3layers.jpg`.

use std::path::{Path, PathBuf};

/// WIFIRE 数据集相对于 `{用户主目录}/dataset` 的目录名.
pub const WIFIRE_DIR: &str = "wifire";

/// WIFIRE 三层样例图像的文件名.
pub const WIFIRE_SAMPLE: &str = "sd-3layers.jpg";

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = home_dataset_dir()?;
    ans.extend(it);
    Some(ans)
}

/// 获取 `{用户主目录}/dataset/wifire/sd-3layers.jpg`.
#[inline]
pub fn home_wifire_sample() -> Option<PathBuf> {
    home_dataset_dir_with([WIFIRE_DIR, WIFIRE_SAMPLE])
}

#[cfg(test)]
mod tests {
    use super::{home_dataset_dir, home_dataset_dir_with, home_wifire_sample};

    #[test]
    fn test_paths_under_home_dataset() {
        let Some(base) = home_dataset_dir() else {
            return;
        };
        assert!(base.ends_with("dataset"));
        let sample = home_wifire_sample().unwrap();
        assert!(sample.starts_with(&base));
        assert!(sample.ends_with("wifire/sd-3layers.jpg"));
        assert_eq!(home_dataset_dir_with(["a", "b"]).unwrap(), base.join("a").join("b"));
    }
}
