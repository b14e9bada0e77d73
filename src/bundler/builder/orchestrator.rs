//! Main packaging orchestration.
//!
//! This module provides the [`Packager`] that sequences environment
//! initialization, the destination safety check, the build, bundle assembly
//! and launcher generation.

use super::{BuildHarness, CargoHarness};
use crate::{
    bundler::{
        BundleLayout, PackagingRequest, assemble,
        guard::is_safe_to_replace,
        launcher::{HandlebarsRenderer, LauncherTemplateData, TemplateRenderer, generate_launchers},
    },
    environment::{Environment, EnvironmentOptions},
    error::{CliError, DeployError, ErrorExt, Result},
};
use path_absolutize::Absolutize;
use std::io;
use std::path::{Path, PathBuf};

/// Main packaging orchestrator.
///
/// Owns the build harness, the template renderer and the one-time
/// [`Environment`]. The environment is resolved on the first request and
/// reused afterwards.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_deploy::bundler::{Packager, PackagingRequest};
/// use kodegen_bundler_deploy::environment::EnvironmentOptions;
///
/// # async fn example() -> kodegen_bundler_deploy::Result<()> {
/// let request = PackagingRequest::new("example.com/chat", "/tmp/chat", None)?;
/// let mut packager = Packager::new(EnvironmentOptions::default());
/// let layout = packager.package(&request).await?;
/// println!("Bundle ready at {}", layout.root().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager<B = CargoHarness, R = HandlebarsRenderer> {
    harness: B,
    renderer: R,
    options: EnvironmentOptions,
    environment: Option<Environment>,
}

impl Packager {
    /// Creates a packager that builds with cargo and renders with Handlebars.
    pub fn new(options: EnvironmentOptions) -> Self {
        Self::with_parts(CargoHarness::new(), HandlebarsRenderer::new(), options)
    }
}

impl<B: BuildHarness, R: TemplateRenderer> Packager<B, R> {
    /// Creates a packager from explicit collaborators.
    pub fn with_parts(harness: B, renderer: R, options: EnvironmentOptions) -> Self {
        Self {
            harness,
            renderer,
            options,
            environment: None,
        }
    }

    pub fn harness(&self) -> &B {
        &self.harness
    }

    pub fn is_initialized(&self) -> bool {
        self.environment.is_some()
    }

    /// Resolves the environment for `request` unless that already happened.
    ///
    /// The environment is bound to one application; a request for another
    /// one is refused rather than bundled with the wrong source tree.
    pub fn ensure_initialized(&mut self, request: &PackagingRequest) -> Result<&Environment> {
        if let Some(env) = &self.environment {
            log::debug!(
                "Reusing environment of {} ({} mode)",
                env.app_import_path(),
                env.run_mode()
            );
        } else {
            let env = Environment::init(
                request.run_mode(),
                request.app_import_path(),
                &self.options,
            )?;
            self.environment = Some(env);
        }

        let env = self.environment.as_ref().ok_or_else(|| {
            DeployError::GenericError("environment missing after initialization".to_string())
        })?;

        if env.app_import_path() != request.app_import_path() {
            return Err(CliError::InvalidArguments {
                reason: format!(
                    "environment is initialized for {}, cannot package {}",
                    env.app_import_path(),
                    request.app_import_path()
                ),
            }
            .into());
        }

        Ok(env)
    }

    /// Runs the whole pipeline for `request`.
    ///
    /// # Process
    ///
    /// 1. Initialize the environment (once)
    /// 2. Refuse destinations overlapping a tree that is read during the run
    /// 3. Refuse destinations that are not empty and not a previous bundle
    /// 4. Clear and recreate the destination
    /// 5. Build the application
    /// 6. Copy binary, runtime support files and application source
    /// 7. Render `run.sh` and `run.bat`
    ///
    /// Every failure aborts immediately. There is no rollback: a failed build
    /// leaves the destination empty, a failed copy leaves it partially filled.
    ///
    /// # Returns
    ///
    /// The [`BundleLayout`] that was written.
    pub async fn package(&mut self, request: &PackagingRequest) -> Result<BundleLayout> {
        let env = self.ensure_initialized(request)?.clone();

        let destination = request.destination().absolutize()?.into_owned();
        let inputs = [
            Some(env.base_path()),
            Some(env.runtime_path()),
            env.templates_dir(),
            self.harness.output_dir(),
        ];
        let resolved = resolve_existing(&destination)?;
        for tree in inputs.into_iter().flatten() {
            check_overlap(&destination, &resolved, tree)?;
        }

        if !is_safe_to_replace(&destination) {
            return Err(DeployError::UnsafeDestination { path: destination });
        }

        log::info!(
            "Packaging {} ({} mode) into {}",
            request.app_import_path(),
            request.run_mode(),
            destination.display()
        );
        assemble::prepare_destination(&destination).await?;

        let artifact = self.harness.build(&env).await?;

        let layout = BundleLayout::new(&destination, &env, &artifact)?;
        assemble::assemble(&layout, &env, &artifact).await?;

        let data = LauncherTemplateData {
            binary_name: artifact.binary_name()?.to_string(),
            import_path: request.app_import_path().to_string(),
            run_mode: request.run_mode().to_string(),
        };
        generate_launchers(layout.root(), &data, &self.renderer, env.templates_dir()).await?;

        log::info!("✓ Created bundle: {}", layout.root().display());
        Ok(layout)
    }
}

/// Fails when the destination and `source_tree` contain one another.
///
/// `resolved` is the destination with symlinks resolved, see [`resolve_existing`].
fn check_overlap(destination: &Path, resolved: &Path, source_tree: &Path) -> Result<()> {
    let tree = resolve_existing(source_tree)?;
    let overlaps = |dest: &Path, tree: &Path| dest.starts_with(tree) || tree.starts_with(dest);
    if overlaps(destination, source_tree) || overlaps(resolved, &tree) {
        return Err(DeployError::DestinationOverlapsSource {
            destination: destination.to_path_buf(),
            source_tree: source_tree.to_path_buf(),
        });
    }
    Ok(())
}

/// Canonicalizes the deepest existing ancestor of `path` and re-appends the
/// components below it that do not exist yet.
fn resolve_existing(path: &Path) -> Result<PathBuf> {
    let path = path.absolutize()?;
    let mut missing = Vec::new();
    let mut current: &Path = &path;
    loop {
        match std::fs::canonicalize(current) {
            Ok(real) => {
                return Ok(missing.iter().rev().fold(real, |acc, part| acc.join(part)));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                match (current.parent(), current.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name.to_os_string());
                        current = parent;
                    }
                    _ => return Ok(path.to_path_buf()),
                }
            }
            Err(e) => return Err(e).fs_context("resolving", current),
        }
    }
}
