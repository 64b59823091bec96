//! 场景的图像来源.

use super::Scene;
use crate::{ImageMirror, MaskError, OpenImageError, SatImage};
use log::debug;
use std::path::Path;

/// 场景的运行结果.
#[derive(Debug, Clone)]
pub struct SceneOutcome {
    /// 实施的场景.
    pub scene: Scene,

    /// 被改写的单元个数. 含义见 [`Scene::apply`].
    pub affected: usize,

    /// 变换后的图像.
    pub image: SatImage,
}

/// 场景的图像来源. 只解码一次源图像, 之后每个场景都从原始镜像得到一份全新的拷贝.
///
/// 因此对同一个 `SceneSource` 依次运行多个场景, 结果与每次都重新读取文件完全相同.
#[derive(Debug, Clone)]
pub struct SceneSource {
    pristine: ImageMirror,
}

impl From<&SatImage> for SceneSource {
    #[inline]
    fn from(value: &SatImage) -> Self {
        Self {
            pristine: value.mirror(),
        }
    }
}

impl SceneSource {
    /// 打开图像文件作为场景来源.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, OpenImageError> {
        let img = SatImage::open(path)?;
        Ok(Self::from(&img))
    }

    /// 获取原始图像的一份全新拷贝.
    #[inline]
    pub fn fresh(&self) -> SatImage {
        self.pristine.restore()
    }

    /// 在一份全新拷贝上运行 `scene`.
    pub fn run(&self, scene: Scene) -> Result<SceneOutcome, MaskError> {
        let mut image = self.fresh();
        debug!("running scene `{scene}` on {:?}", image.shape());
        let affected = scene.apply(&mut image)?;
        Ok(SceneOutcome {
            scene,
            affected,
            image,
        })
    }

    /// 按演示顺序依次运行全部场景. 每个场景相互独立, 某个场景失败不影响后续场景.
    pub fn run_all(
        &self,
    ) -> impl Iterator<Item = (Scene, Result<SceneOutcome, MaskError>)> + '_ {
        Scene::ALL.into_iter().map(|s| (s, self.run(s)))
    }
}
