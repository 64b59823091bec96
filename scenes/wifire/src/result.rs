//! 运行结果.

use sat_berry::prelude::*;
use std::io::{self, Write};
use std::path::PathBuf;

/// 将源图像的统计信息写进 `w` 中.
fn describe_stats_into<W: Write>(s: &ImageStats, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    let (h, wd, ch) = s.shape;
    writeln!(w, "Source image:")?;
    writeln!(w, "{S4}Shape: {h} x {wd} x {ch}")?;
    writeln!(w, "{S4}Range: [{}, {}], mean {:.3}", s.min, s.max, s.mean)?;
    for c in Channel::ALL {
        let cs = s.channel(c);
        writeln!(
            w,
            "{S4}{:?} ({}): [{}, {}], mean {:.3}",
            c,
            c.terrain_name(),
            cs.min,
            cs.max,
            cs.mean
        )?;
    }
    Ok(())
}

/// 将单个场景的结果写进 `w` 中.
fn describe_into<W: Write>(
    scene: Scene,
    r: &Result<(usize, PathBuf), MaskError>,
    w: &mut W,
) -> io::Result<()> {
    const S4: &str = "    ";

    writeln!(w, "Scene `{scene}`:")?;
    match r {
        Ok((affected, path)) => {
            writeln!(w, "{S4}Affected: {affected}")?;
            write!(w, "{S4}Output: {}", path.display())
        }
        Err(e) => write!(w, "{S4}Failed: {e}"),
    }
}

/// 全部场景的运行结果.
pub struct SceneReport {
    stats: ImageStats,
    data: Vec<(Scene, Result<(usize, PathBuf), MaskError>)>,
}

impl SceneReport {
    pub fn new(stats: ImageStats) -> Self {
        Self {
            stats,
            data: Vec::with_capacity(Scene::ALL.len()),
        }
    }

    pub fn push_ok(&mut self, scene: Scene, affected: usize, path: PathBuf) {
        self.data.push((scene, Ok((affected, path))));
    }

    pub fn push_err(&mut self, scene: Scene, e: MaskError) {
        self.data.push((scene, Err(e)));
    }

    /// 打印运行结果.
    pub fn analyze(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        utils::sep_to(&mut out)?;
        describe_stats_into(&self.stats, &mut out)?;
        utils::sep_to(&mut out)?;
        for (scene, r) in self.data.iter() {
            describe_into(*scene, r, &mut out)?;
            writeln!(out)?;
            utils::sep_to(&mut out)?;
        }
        let failed = self.data.iter().filter(|(_, r)| r.is_err()).count();
        writeln!(out, "{} scenes, {failed} failed", self.data.len())
    }
}
