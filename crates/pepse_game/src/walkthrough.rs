use pepse_core::input::Key;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scripted avatar input, one entry per run of identical frames.
#[derive(Debug, Deserialize, Clone)]
pub struct Walkthrough {
    #[serde(default = "default_dt")]
    pub frame_dt: f32,
    pub frames: Vec<WalkFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WalkFrame {
    #[serde(default)]
    pub move_x: f32,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl WalkFrame {
    fn new(move_x: f32, jump: bool, repeat: u32) -> Self {
        Self {
            move_x,
            jump,
            repeat,
        }
    }
}

impl Walkthrough {
    /// Run right in bursts, resting between them to recover energy, then
    /// walk back twice as far so both window edges get exercised.
    pub fn default_tour() -> Self {
        let mut frames = Vec::new();
        for _ in 0..8 {
            frames.push(WalkFrame::new(1.0, true, 10));
            frames.push(WalkFrame::new(1.0, false, 170));
            frames.push(WalkFrame::new(0.0, false, 90));
        }
        for _ in 0..16 {
            frames.push(WalkFrame::new(-1.0, false, 180));
            frames.push(WalkFrame::new(0.0, false, 90));
        }
        Self {
            frame_dt: default_dt(),
            frames,
        }
    }

    /// One held-key set per frame.
    pub fn expanded_keys(&self) -> Vec<Vec<Key>> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let mut keys = Vec::new();
            let move_x = frame.move_x.clamp(-1.0, 1.0);
            if move_x < 0.0 {
                keys.push(Key::Left);
            } else if move_x > 0.0 {
                keys.push(Key::Right);
            }
            if frame.jump {
                keys.push(Key::Jump);
            }
            for _ in 0..frame.repeat.max(1) {
                out.push(keys.clone());
            }
        }
        out
    }
}

pub fn load_walkthrough_from_path(path: &Path) -> Result<Walkthrough, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let walk: Walkthrough = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse walkthrough JSON {}: {e}", path.display()))?;
    validate_walkthrough(&walk)?;
    Ok(walk)
}

fn validate_walkthrough(walk: &Walkthrough) -> Result<(), String> {
    if walk.frame_dt <= 0.0 {
        return Err("Walkthrough validation failed: frame_dt must be > 0".to_string());
    }
    if walk.frames.is_empty() {
        return Err("Walkthrough validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "pepse_walk_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn load_walkthrough_expands_repeats() {
        let path = temp_file_path("valid");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "move_x": 1.0, "repeat": 3 },
                { "jump": true },
                { "move_x": -5.0, "repeat": 2 }
              ]
            }"#,
        )
        .expect("write temp file");

        let walk = load_walkthrough_from_path(&path).expect("walkthrough should load");
        assert!((walk.frame_dt - 1.0 / 60.0).abs() < 1e-6);
        let keys = walk.expanded_keys();
        assert_eq!(keys.len(), 6);
        assert_eq!(keys[0], vec![Key::Right]);
        assert_eq!(keys[3], vec![Key::Jump]);
        assert_eq!(keys[5], vec![Key::Left], "move_x is clamped, not rejected");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_walkthrough_rejects_empty_frames() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write temp file");
        let err = load_walkthrough_from_path(&path).expect_err("empty frames should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn zero_repeat_still_plays_once() {
        let walk = Walkthrough {
            frame_dt: default_dt(),
            frames: vec![WalkFrame::new(0.0, false, 0)],
        };
        assert_eq!(walk.expanded_keys(), vec![Vec::<Key>::new()]);
    }

    #[test]
    fn default_tour_goes_both_ways() {
        let keys = Walkthrough::default_tour().expanded_keys();
        assert!(keys.iter().any(|k| k.contains(&Key::Right)));
        assert!(keys.iter().any(|k| k.contains(&Key::Left)));
        assert!(keys.iter().any(|k| k.contains(&Key::Jump)));
    }
}
