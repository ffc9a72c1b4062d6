//! Command line front end.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use shapeink_core::{ConfigError, Editor, EditorConfig, Scene, StorageError};
use thiserror::Error;

use crate::replay::{self, ScriptError};
use crate::shortcuts::ShortcutRegistry;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("script {path}: {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: ScriptError,
    },
    #[error("failed to read script {path}: {source}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Parser)]
#[command(name = "shapeink", about = "ShapeInk 2D shape editor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every shape in a scene file.
    Info { file: PathBuf },
    /// Convert a scene between the text and JSON formats.
    Convert { input: PathBuf, output: PathBuf },
    /// Apply a scripted editing session to a scene file.
    Replay {
        /// Scene to edit; started empty when the file does not exist.
        scene: PathBuf,
        /// Script with one input step per line.
        script: PathBuf,
        /// Write the result here instead of back to SCENE.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Editor settings as JSON.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List keyboard shortcuts.
    Keys,
}

fn load_scene(path: &Path, config: &EditorConfig) -> Result<Scene, CliError> {
    let mut scene = Scene::with_config(&config.scene);
    let summary = scene.load_from_file(path)?;
    if summary.skipped > 0 {
        log::warn!("{} malformed records skipped in {}", summary.skipped, path.display());
    }
    Ok(scene)
}

fn describe(scene: &Scene) -> String {
    let mut out = format!("{} shapes\n", scene.len());
    for shape in scene.shapes() {
        let style = shape.style();
        out.push_str(&format!(
            "{:<9} {} color=#{:06X} opacity={:.2} border={:?} rotation={}\n",
            shape.kind_name(),
            shape.bounds(),
            style.color.to_rgb_int(),
            style.opacity,
            style.border,
            shape.rotation(),
        ));
    }
    if let Some(bounds) = scene.bounds() {
        out.push_str(&format!("extent {bounds}\n"));
    }
    out
}

/// Execute one parsed command line, returning what should be printed.
pub fn run(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Command::Info { file } => {
            let scene = load_scene(&file, &EditorConfig::default())?;
            Ok(describe(&scene))
        }
        Command::Convert { input, output } => {
            let scene = load_scene(&input, &EditorConfig::default())?;
            scene.save_to_file(&output)?;
            Ok(format!(
                "wrote {} shapes to {}\n",
                scene.len(),
                output.display()
            ))
        }
        Command::Replay {
            scene,
            script,
            out,
            config,
        } => {
            let config = match config {
                Some(path) => EditorConfig::load(path)?,
                None => EditorConfig::default(),
            };
            let text = fs::read_to_string(&script).map_err(|source| CliError::ReadScript {
                path: script.clone(),
                source,
            })?;
            let steps = replay::parse_script(&text).map_err(|source| CliError::Script {
                path: script.clone(),
                source,
            })?;

            let start = if scene.exists() {
                load_scene(&scene, &config)?
            } else {
                log::info!("{} does not exist, starting empty", scene.display());
                Scene::with_config(&config.scene)
            };
            let mut editor = Editor::with_scene(start, config);
            replay::run_steps(&mut editor, &steps);

            let target = out.unwrap_or(scene);
            let result = editor.into_scene();
            result.save_to_file(&target)?;
            Ok(format!(
                "replayed {} steps, wrote {} shapes to {}\n",
                steps.len(),
                result.len(),
                target.display()
            ))
        }
        Command::Keys => Ok(ShortcutRegistry::render()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeink_core::{Circle, Point, ShapeColor, Square};
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shapeink").chain(args.iter().copied())).unwrap()
    }

    fn sample_scene(path: &std::path::Path) {
        let mut scene = Scene::new();
        scene.add_shape(Square::new(Point::new(10, 10), 50, ShapeColor::RED));
        scene.add_shape(Circle::new(Point::new(200, 200), 25, ShapeColor::BLUE));
        scene.save_to_file(path).unwrap();
    }

    #[test]
    fn test_parse_replay_args() {
        let parsed = cli(&["replay", "a.txt", "b.script", "--out", "c.json"]);
        match parsed.command {
            Command::Replay { scene, out, config, .. } => {
                assert_eq!(scene, PathBuf::from("a.txt"));
                assert_eq!(out, Some(PathBuf::from("c.json")));
                assert!(config.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_info_lists_shapes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.txt");
        sample_scene(&path);
        let output = run(cli(&["info", path.to_str().unwrap()])).unwrap();
        assert!(output.starts_with("2 shapes"));
        assert!(output.contains("SQUARE"));
        assert!(output.contains("CIRCLE"));
        assert!(output.contains("color=#FF0000"));
    }

    #[test]
    fn test_info_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let err = run(cli(&["info", path.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, CliError::Storage(StorageError::NotFound(_))));
    }

    #[test]
    fn test_convert_to_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("scene.txt");
        let output = dir.path().join("scene.json");
        sample_scene(&input);
        run(cli(&[
            "convert",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ]))
        .unwrap();

        let mut scene = Scene::new();
        scene.load_json(&output).unwrap();
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_replay_creates_scene() {
        let dir = tempdir().unwrap();
        let scene_path = dir.path().join("new.txt");
        let script = dir.path().join("draw.script");
        fs::write(
            &script,
            "tool square\ndown 100 100\nup\ntool circle\ndown 400 400\nup\n",
        )
        .unwrap();

        let output = run(cli(&[
            "replay",
            scene_path.to_str().unwrap(),
            script.to_str().unwrap(),
        ]))
        .unwrap();
        assert!(output.contains("wrote 2 shapes"));

        let mut scene = Scene::new();
        scene.load_from_file(&scene_path).unwrap();
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_replay_bad_script() {
        let dir = tempdir().unwrap();
        let scene_path = dir.path().join("scene.txt");
        let script = dir.path().join("bad.script");
        fs::write(&script, "tool square\nwiggle\n").unwrap();

        let err = run(cli(&[
            "replay",
            scene_path.to_str().unwrap(),
            script.to_str().unwrap(),
        ]))
        .unwrap_err();
        match err {
            CliError::Script { source, .. } => assert_eq!(source.line, 2),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!scene_path.exists());
    }

    #[test]
    fn test_keys() {
        let output = run(cli(&["keys"])).unwrap();
        assert!(output.contains("Ctrl+Z"));
    }
}
