//! Status command - check toolchain health and workspace writability

use crate::config::Config;
use crate::error::TexPngResult;
use crate::render::toolchain::{SystemToolchain, Toolchain};
use console::{style, Emoji};
use tokio::fs;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[FAIL] ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");

/// Execute the status command
pub async fn execute(config: &Config) -> TexPngResult<()> {
    println!("{}", style("texpng System Status").bold().cyan());
    println!();

    let toolchain = SystemToolchain::new(&config.tools);
    let mut all_ok = true;

    println!("{}", style("Toolchain:").bold());
    all_ok &= check_tool(
        "latex",
        &config.tools.latex.display().to_string(),
        toolchain.compiler_available().await,
        "Install a TeX distribution (e.g. apt install texlive)",
    );
    all_ok &= check_tool(
        "dvipng",
        &config.tools.dvipng.display().to_string(),
        toolchain.converter_available().await,
        "Install dvipng (e.g. apt install dvipng)",
    );

    println!();
    println!("{}", style("Workspace:").bold());
    all_ok &= check_work_dir(config).await;

    println!();
    if all_ok {
        println!("{}", style("All checks passed").green().bold());
    } else {
        println!(
            "{}",
            style("Some checks failed - see above for details")
                .yellow()
                .bold()
        );
    }

    Ok(())
}

fn check_tool(name: &str, path: &str, available: bool, install_hint: &str) -> bool {
    if available {
        println!("  {} {} - {}", CHECK, style(name).green(), path);
        true
    } else {
        println!(
            "  {} {} - not found at {}. {}",
            CROSS,
            style(name).red(),
            path,
            install_hint
        );
        false
    }
}

async fn check_work_dir(config: &Config) -> bool {
    let dir = &config.render.work_dir;

    if let Err(e) = fs::create_dir_all(dir).await {
        println!(
            "  {} {} - cannot create {}: {}",
            CROSS,
            style("work dir").red(),
            dir.display(),
            e
        );
        return false;
    }

    let probe = dir.join(format!(".texpng-probe-{}", std::process::id()));
    match fs::write(&probe, b"probe").await {
        Ok(()) => {
            let _ = fs::remove_file(&probe).await;
            println!(
                "  {} {} - {}",
                CHECK,
                style("work dir").green(),
                dir.display()
            );
            true
        }
        Err(e) => {
            println!(
                "  {} {} - {} is not writable: {}",
                WARN,
                style("work dir").yellow(),
                dir.display(),
                e
            );
            false
        }
    }
}
