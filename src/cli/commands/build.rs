//! The `build` subcommand.

use crate::bundler::{CargoHarness, Packager, PackagingRequest, launcher::HandlebarsRenderer};
use crate::cli::args::BuildArgs;
use crate::environment::EnvironmentOptions;
use crate::error::Result;

/// One-line usage of the `build` subcommand
pub const BUILD_USAGE: &str = "build [import path] [target path] [run mode]";

/// Extended help of the `build` subcommand
pub const BUILD_LONG: &str = "
Build the application named by the given import path into a deployment bundle.
The bundle runs on a machine that lacks the build toolchain.

The run mode selects which configuration profile applies and may be used to
determine logic in the application itself.

Run mode defaults to \"dev\".

WARNING: The target path will be completely deleted, if it already exists!

For example:

    kodegen_bundler_deploy build example.com/chat /tmp/chat
";

/// Execute the `build` subcommand.
///
/// Missing positional arguments are not an error: the usage text is printed
/// to stderr and the command returns exit code 0 without touching anything.
pub async fn execute(args: &BuildArgs) -> Result<i32> {
    let (Some(import_path), Some(target_path)) = (&args.import_path, &args.target_path) else {
        eprintln!("{BUILD_USAGE}\n{BUILD_LONG}");
        return Ok(0);
    };

    let request = PackagingRequest::new(import_path, target_path, args.run_mode.as_deref())?;

    let mut packager = Packager::with_parts(
        CargoHarness::new()
            .with_profile(args.profile.clone())
            .with_target_dir(args.target_dir.clone()),
        HandlebarsRenderer::new(),
        EnvironmentOptions::from(args),
    );
    let layout = packager.package(&request).await?;

    println!("Bundle created at {}", layout.root().display());
    Ok(0)
}
