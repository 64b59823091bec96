//! 对 `sat-berry::dataset` 的更一层封装. 提供更直接的图像加载器.

use sat_berry::dataset::{self, WIFIRE_DIR};
use sat_berry::scene::SceneSource;
use sat_berry::OpenImageError;
use std::env;
use std::path::{Path, PathBuf};

/// 从环境变量 `key` 读取路径. 未设置或为空时返回 `None`.
fn path_from_env(key: &str) -> Option<PathBuf> {
    env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// 获取 WIFIRE 样例图像路径.
///
/// 1. 若环境变量 `$WIFIRE_IMAGE` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/wifire/sd-3layers.jpg`.
///
/// 两者都无法确定时返回 `None`.
pub fn image_path_from_env_or_home() -> Option<PathBuf> {
    path_from_env("WIFIRE_IMAGE").or_else(dataset::home_wifire_sample)
}

/// 获取场景输出目录.
///
/// 1. 若环境变量 `$WIFIRE_OUT_DIR` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/wifire/out`.
pub fn out_dir_from_env_or_home() -> Option<PathBuf> {
    path_from_env("WIFIRE_OUT_DIR").or_else(|| dataset::home_dataset_dir_with([WIFIRE_DIR, "out"]))
}

/// 打开 `path` 处的图像作为场景来源.
#[inline]
pub fn scene_source<P: AsRef<Path>>(path: P) -> Result<SceneSource, OpenImageError> {
    SceneSource::open(path)
}

#[cfg(test)]
mod tests {
    use super::path_from_env;
    use std::env;

    #[test]
    fn test_path_from_env() {
        let key = "SCENES_UTILS_TEST_PATH";
        env::remove_var(key);
        assert_eq!(path_from_env(key), None);
        env::set_var(key, "");
        assert_eq!(path_from_env(key), None);
        env::set_var(key, "/tmp/a.jpg");
        assert_eq!(path_from_env(key), Some("/tmp/a.jpg".into()));
        env::remove_var(key);
    }
}
