//! MD5 animation command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use md5_anim::{JointNameTable, Md5Anim};

#[derive(Subcommand)]
pub enum AnimCommands {
    /// Display information about an animation file
    Info {
        /// Path to the animation file (text or binary)
        file: PathBuf,
    },

    /// Print an animation's joint hierarchy
    Joints {
        /// Path to the animation file (text or binary)
        file: PathBuf,
    },

    /// Validate an animation file
    Validate {
        /// Path to the animation file (text or binary)
        file: PathBuf,
    },

    /// Compile a text animation into its binary fast-path form
    Compile {
        /// Path to the input text animation
        input: PathBuf,

        /// Path to write the binary animation
        output: PathBuf,
    },
}

pub fn execute(command: AnimCommands) -> Result<()> {
    match command {
        AnimCommands::Info { file } => execute_info(&file),
        AnimCommands::Joints { file } => execute_joints(&file),
        AnimCommands::Validate { file } => execute_validate(&file),
        AnimCommands::Compile { input, output } => execute_compile(&input, &output),
    }
}

fn load_anim(file: &Path, names: &mut JointNameTable) -> Result<Md5Anim> {
    Md5Anim::load(file, names)
        .with_context(|| format!("Failed to load animation {}", file.display()))
}

fn execute_info(file: &Path) -> Result<()> {
    let mut names = JointNameTable::new();
    let anim = load_anim(file, &mut names)?;
    let delta = anim.total_delta();

    println!("Animation: {}", anim.name());
    println!("  Frames:              {}", anim.num_frames());
    println!("  Joints:              {}", anim.num_joints());
    println!("  Frame rate:          {} fps", anim.frame_rate());
    println!("  Length:              {} ms", anim.length_ms());
    println!("  Animated components: {}", anim.num_animated_components());
    println!(
        "  Movement delta:      ({:.3} {:.3} {:.3})",
        delta.x, delta.y, delta.z
    );

    Ok(())
}

fn execute_joints(file: &Path) -> Result<()> {
    let mut names = JointNameTable::new();
    let anim = load_anim(file, &mut names)?;

    println!("{} joints:", anim.num_joints());
    for (i, info) in anim.joints().iter().enumerate() {
        let name = info
            .name_index
            .and_then(|index| names.resolve(index))
            .unwrap_or("<unresolved>");
        let channels = info.bits.component_count();
        if info.parent < 0 {
            println!("  {i:3}  {name:<24} root        {channels} animated channels");
        } else {
            println!(
                "  {i:3}  {name:<24} parent {:3}  {channels} animated channels",
                info.parent
            );
        }
    }

    Ok(())
}

fn execute_validate(file: &Path) -> Result<()> {
    let mut names = JointNameTable::new();
    let anim = load_anim(file, &mut names)?;

    println!(
        "{} is valid: {} frames, {} joints, {} ms",
        file.display(),
        anim.num_frames(),
        anim.num_joints(),
        anim.length_ms()
    );

    Ok(())
}

fn execute_compile(input: &Path, output: &Path) -> Result<()> {
    let mut names = JointNameTable::new();
    let anim = load_anim(input, &mut names)?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    anim.write_binary(&names, &mut writer)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Compiled {} -> {}", input.display(), output.display());

    Ok(())
}
