//! The engine facade.
//!
//! `Engine` is the single object build scripts talk to. It owns every piece
//! of mutable state (the 64-bit cache and the identifier registry) and
//! wires the components together over one normalizing filesystem adapter.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::{ConfigError, EngineConfig};
use crate::glob::{Excludes, GlobError, GlobMatcher, MatchKind};
use crate::mutate::{MutateError, RemoveTarget, TreeMutator};
use crate::normalizing::NormalizingFs;
use crate::platform::{HostOs, PlatformProbe};
use crate::ports::{FileSystemPort, Ports};
use crate::search::{PathSearch, SearchPath};
use crate::uuid_registry::UuidRegistry;

/// Composed engine exposing every operation.
#[derive(Debug, Clone)]
pub struct Engine {
    glob: GlobMatcher,
    search: PathSearch,
    mutator: TreeMutator,
    platform: Arc<PlatformProbe>,
    uuids: Arc<UuidRegistry>,
    config: Arc<EngineConfig>,
}

impl Engine {
    /// Compose an engine from raw ports.
    ///
    /// The filesystem port is wrapped in [`NormalizingFs`] here; nothing
    /// else in the engine sees the raw adapter.
    pub fn new(ports: Ports, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config = Arc::new(config);

        let fs: Arc<dyn FileSystemPort> = Arc::new(NormalizingFs::new(ports.fs));
        let platform = Arc::new(PlatformProbe::new(
            ports.host,
            ports.env.clone(),
            ports.commands,
        ));
        let case_insensitive = config
            .case_insensitive
            .unwrap_or_else(|| platform.os().is_case_insensitive());

        let glob = GlobMatcher::new(fs.clone(), case_insensitive);
        let search = PathSearch::new(
            fs.clone(),
            ports.env,
            platform.clone(),
            glob.clone(),
            config.clone(),
        );
        let mutator = TreeMutator::new(fs, glob.clone(), ports.diagnostics.clone());
        let uuids = Arc::new(UuidRegistry::new(ports.uuids, ports.diagnostics));

        Ok(Self {
            glob,
            search,
            mutator,
            platform,
            uuids,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // Matching

    pub fn match_files(&self, mask: &str) -> Result<Vec<String>, GlobError> {
        self.glob.match_files(mask)
    }

    pub fn match_dirs(&self, mask: &str) -> Result<Vec<String>, GlobError> {
        self.glob.match_dirs(mask)
    }

    pub fn match_paths(
        &self,
        mask: &str,
        kind: MatchKind,
        excludes: &Excludes,
    ) -> Result<Vec<String>, GlobError> {
        self.glob.match_paths(mask, kind, excludes)
    }

    /// Files matching any of `masks`, first occurrence kept.
    pub fn match_files_in<S: AsRef<str>>(&self, masks: &[S]) -> Result<Vec<String>, GlobError> {
        self.glob
            .match_all(masks, MatchKind::Files, &Excludes::default())
    }

    /// Directories matching any of `masks`, first occurrence kept.
    pub fn match_dirs_in<S: AsRef<str>>(&self, masks: &[S]) -> Result<Vec<String>, GlobError> {
        self.glob
            .match_all(masks, MatchKind::Dirs, &Excludes::default())
    }

    // Searching

    pub fn find_library(&self, name: &str) -> Option<String> {
        self.search.find_library(name)
    }

    pub fn find_library_in(&self, name: &str, extra_dirs: &[String]) -> Option<String> {
        self.search.find_library_in(name, extra_dirs)
    }

    pub fn locate<S: AsRef<str>>(&self, names: &[S]) -> Option<String> {
        self.search.locate(names)
    }

    pub fn path_search(&self, file_name: &str, path: &SearchPath) -> Option<String> {
        self.search.path_search(file_name, path)
    }

    pub fn library_search_path(&self) -> SearchPath {
        self.search.library_search_path(&[])
    }

    pub fn script_search_path(&self) -> SearchPath {
        self.search.script_search_path()
    }

    // Mutation

    pub fn make_dirs(&self, path: &str) -> Result<(), MutateError> {
        self.mutator.make_dirs(path)
    }

    pub fn remove_all(&self, target: impl Into<RemoveTarget>) -> Result<(), MutateError> {
        self.mutator.remove_all(&target.into())
    }

    pub fn remove_dir_recursive(&self, path: &str) -> Result<(), MutateError> {
        self.mutator.remove_dir_recursive(path)
    }

    // Platform

    pub fn os(&self) -> &HostOs {
        self.platform.os()
    }

    pub fn os_id(&self) -> &str {
        self.platform.os_id()
    }

    pub fn is(&self, id: &str) -> bool {
        self.platform.is(id)
    }

    pub fn is_64bit(&self) -> bool {
        self.platform.is_64bit()
    }

    // Identifiers

    pub fn generate_uuid(&self, name: Option<&str>) -> Uuid {
        self.uuids.generate(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FixedHost, MemoryFs, RecordingDiagnostics, ScriptedCommands, SequenceUuids, StaticEnv,
    };

    fn engine_with(fs: MemoryFs, host: FixedHost) -> (Engine, Arc<MemoryFs>) {
        let fs = Arc::new(fs);
        let ports = Ports::new(
            fs.clone(),
            Arc::new(StaticEnv::new()),
            Arc::new(ScriptedCommands::new().with("uname -m", "x86_64")),
            Arc::new(host),
        );
        let engine = Engine::new(ports, EngineConfig::default()).unwrap();
        (engine, fs)
    }

    #[test]
    fn test_scenario_through_engine() {
        let (engine, _) = engine_with(
            MemoryFs::new()
                .with_file("src/a.c")
                .with_file("src/b.c")
                .with_file("src/sub/c.c"),
            FixedHost::new(HostOs::Linux),
        );
        assert_eq!(
            engine.match_files("src/**.c").unwrap(),
            vec!["src/a.c", "src/b.c", "src/sub/c.c"]
        );
        assert_eq!(engine.match_files("src/*.c").unwrap(), vec!["src/a.c", "src/b.c"]);
        assert_eq!(engine.match_dirs("src/*").unwrap(), vec!["src/sub"]);
    }

    #[test]
    fn test_backslash_masks_are_normalized() {
        let (engine, _) = engine_with(
            MemoryFs::new().with_file("src/sub/c.c"),
            FixedHost::new(HostOs::Linux),
        );
        assert_eq!(engine.match_files("src\\sub\\*.c").unwrap(), vec!["src/sub/c.c"]);
    }

    #[test]
    fn test_case_mode_follows_host() {
        let (engine, _) = engine_with(
            MemoryFs::new().with_file("Src/Main.C"),
            FixedHost::new(HostOs::Windows),
        );
        assert_eq!(engine.match_files("Src/*.c").unwrap(), vec!["Src/Main.C"]);

        let (engine, _) = engine_with(
            MemoryFs::new().with_file("Src/Main.C"),
            FixedHost::new(HostOs::Linux),
        );
        assert!(engine.match_files("Src/*.c").unwrap().is_empty());
    }

    #[test]
    fn test_mutations_through_engine() {
        let (engine, fs) = engine_with(MemoryFs::new(), FixedHost::new(HostOs::Linux));
        engine.make_dirs("out/obj").unwrap();
        engine.make_dirs("out/obj").unwrap();
        engine.remove_all(vec!["out/*.o"]).unwrap();
        engine.remove_dir_recursive("out").unwrap();
        assert!(fs.paths().is_empty());
    }

    #[test]
    fn test_best_effort_removal_failures_reach_the_sink() {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let ports = Ports::new(
            Arc::new(MemoryFs::new().with_file("out/held.o").with_failing("out/held.o")),
            Arc::new(StaticEnv::new()),
            Arc::new(ScriptedCommands::new()),
            Arc::new(FixedHost::new(HostOs::Linux)),
        )
        .with_diagnostics(diagnostics.clone());
        let engine = Engine::new(ports, EngineConfig::default()).unwrap();

        assert!(engine.remove_dir_recursive("out").is_err());
        assert_eq!(diagnostics.errors().len(), 1);
    }

    #[test]
    fn test_platform_through_engine() {
        let (engine, _) = engine_with(MemoryFs::new(), FixedHost::new(HostOs::Linux));
        assert_eq!(engine.os_id(), "linux");
        assert!(engine.is("LINUX"));
        assert!(engine.is_64bit());
        assert_eq!(engine.is_64bit(), engine.is_64bit());
    }

    #[test]
    fn test_uuid_collisions_reach_the_sink() {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let ports = Ports::new(
            Arc::new(MemoryFs::new()),
            Arc::new(StaticEnv::new()),
            Arc::new(ScriptedCommands::new()),
            Arc::new(FixedHost::new(HostOs::Linux)),
        )
        .with_uuids(Arc::new(SequenceUuids::constant(Uuid::from_u128(7))))
        .with_diagnostics(diagnostics.clone());
        let engine = Engine::new(ports, EngineConfig::default()).unwrap();

        engine.generate_uuid(Some("B"));
        engine.generate_uuid(Some("A"));
        engine.generate_uuid(Some("A"));
        assert_eq!(diagnostics.warnings().len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let ports = Ports::new(
            Arc::new(MemoryFs::new()),
            Arc::new(StaticEnv::new()),
            Arc::new(ScriptedCommands::new()),
            Arc::new(FixedHost::new(HostOs::Linux)),
        );
        let config = EngineConfig {
            script_path_var: String::new(),
            ..EngineConfig::default()
        };
        assert!(Engine::new(ports, config).is_err());
    }
}
