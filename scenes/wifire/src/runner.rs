//! 程序运行函数.

use crate::result::SceneReport;
use anyhow::Context;
use log::{info, warn};
use sat_berry::prelude::*;
use std::fs;
use utils::loader;

/// 实际运行.
pub fn run() -> anyhow::Result<SceneReport> {
    let image_path = loader::image_path_from_env_or_home()
        .context("cannot determine image path: set $WIFIRE_IMAGE")?;
    let out_dir = loader::out_dir_from_env_or_home()
        .context("cannot determine output directory: set $WIFIRE_OUT_DIR")?;
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let src = loader::scene_source(&image_path)
        .with_context(|| format!("opening {}", image_path.display()))?;
    let stats = src.fresh().stats();
    info!("loaded {} with shape {:?}", image_path.display(), stats.shape);

    let mut report = SceneReport::new(stats);
    for (idx, (scene, outcome)) in src.run_all().enumerate() {
        match outcome {
            Ok(out) => {
                let path = out_dir.join(format!("{idx:02}-{}.png", scene.name()));
                out.image
                    .save(&path)
                    .with_context(|| format!("saving {}", path.display()))?;
                info!("scene `{scene}` written to {}", path.display());
                report.push_ok(scene, out.affected, path);
            }
            Err(e) => {
                warn!("scene `{scene}` failed: {e}");
                report.push_err(scene, e);
            }
        }
    }
    Ok(report)
}
