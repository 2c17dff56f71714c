#![forbid(unsafe_code)]
//! `git-ssh-buildpack`, run by the CNB lifecycle as `bin/detect` and `bin/build`.

mod errors;

use std::io;
use std::process;

use gitssh_config::{BuildEnv, LogLevel};
use gitssh_engine::{Detection, Emitter};
use gitssh_util::CommandRunner;
use libcnb::build::{BuildContext, BuildResult, BuildResultBuilder};
use libcnb::data::layer_name;
use libcnb::detect::{DetectContext, DetectResult, DetectResultBuilder};
use libcnb::generic::{GenericMetadata, GenericPlatform};
use libcnb::layer::{CachedLayerDefinition, InvalidMetadataAction, RestoredLayerAction};
use libcnb::{buildpack_main, Buildpack, Env, Platform};
use tracing_subscriber::EnvFilter;

use crate::errors::GitSshBuildpackError;

pub(crate) struct GitSshBuildpack;

impl Buildpack for GitSshBuildpack {
    type Platform = GenericPlatform;
    type Metadata = GenericMetadata;
    type Error = GitSshBuildpackError;

    fn detect(&self, context: DetectContext<Self>) -> libcnb::Result<DetectResult, Self::Error> {
        let env = load_env(context.platform.env());
        match gitssh_engine::detect(&env) {
            Detection::Pass => {
                let plan = gitssh_engine::build_plan().map_err(GitSshBuildpackError::BuildPlan)?;
                DetectResultBuilder::pass().build_plan(plan).build()
            }
            Detection::Fail { reason } => {
                let mut log = Emitter::new(io::stdout()).with_level(env.log_level());
                log.process(reason);
                DetectResultBuilder::fail().build()
            }
        }
    }

    fn build(&self, context: BuildContext<Self>) -> libcnb::Result<BuildResult, Self::Error> {
        let env = load_env(context.platform.env());
        let mut log = Emitter::new(io::stdout()).with_level(env.log_level());
        let (name, version) = title(&context.buildpack_descriptor.buildpack);
        log.title(&name, &version);

        let contribution = gitssh_engine::contribute(
            &context.buildpack_plan.entries,
            &env,
            &CommandRunner,
            &mut log,
        )
        .map_err(GitSshBuildpackError::Contribute)?;

        let layer = context.cached_layer(
            layer_name!("sshagent"),
            CachedLayerDefinition {
                build: contribution.flags.build,
                launch: contribution.flags.launch,
                invalid_metadata_action: &|_| InvalidMetadataAction::DeleteLayer,
                restored_layer_action: &|_: &GenericMetadata, _| RestoredLayerAction::DeleteLayer,
            },
        )?;
        layer.write_env(contribution.layer_env())?;

        BuildResultBuilder::new().build()
    }

    fn on_error(&self, error: libcnb::Error<Self::Error>) {
        let mut log = Emitter::new(io::stderr());
        process::exit(errors::report(&error, &mut log));
    }
}

/// Read the buildpack's variables and set up diagnostics at the level they ask for.
fn load_env(env: &Env) -> BuildEnv {
    let env = BuildEnv::from_env(env);
    init_tracing(env.log_level());
    env
}

/// `<name> <version>` for the build output, falling back to the id when
/// `buildpack.toml` has no name.
fn title(buildpack: &libcnb::data::buildpack::Buildpack) -> (String, String) {
    let name = buildpack
        .name
        .clone()
        .unwrap_or_else(|| buildpack.id.to_string());
    (name, buildpack.version.to_string())
}

/// Diagnostics on stderr. `RUST_LOG` wins; otherwise `BP_LOG_LEVEL=DEBUG`
/// turns on debug events and everything else shows warnings only.
fn init_tracing(level: LogLevel) {
    let default = match level {
        LogLevel::Debug => "debug",
        LogLevel::Info => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

buildpack_main!(GitSshBuildpack);
