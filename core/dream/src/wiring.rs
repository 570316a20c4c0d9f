//! 配線: 標準アダプタで UseCase を組み立てる

use std::io::IsTerminal;
use std::sync::Arc;

use common::adapter::{
    FanoutLog, FileJsonLog, FileKeyValueStore, StderrLog, StdClock, StdEnvResolver,
    StdFileSystem, StdIdGenerator, StdProcess,
};
use common::config::AppConfig;
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use common::llm::{create_driver, resolve_provider};
use common::ports::outbound::{
    Clock, EnvResolver, FileSystem, IdGenerator, KeyValueStore, Log, LogLevel, LogRecord, Process,
};

use crate::adapter::{
    default_ad_unit_id, AssumeYesConfirmation, CliConfirmation, CommandShare, ConsoleAdDisplay,
    DreamStore, LlmTextGenerator, LoggingDreamRepository, NoopAdDisplay,
    NonInteractiveConfirmation, StdoutShare,
};
use crate::ports::outbound::{AdDisplay, Confirmation, DreamRepository, ShareTarget, TextGenerator};
use crate::usecase::{AdScheduler, DiaryUseCase, InterpretUseCase, LearningUseCase};

/// 配線時に CLI から渡す指定
#[derive(Debug, Clone, Default)]
pub struct WiringOptions {
    pub verbose: bool,
    pub provider: Option<String>,
    pub model: Option<String>,
    /// 削除確認を省略する（--yes）
    pub assume_yes: bool,
}

/// 配線で組み立てたユースケース群（main の Command ディスパッチで利用）
pub struct App {
    pub interpret_use_case: InterpretUseCase,
    pub diary_use_case: DiaryUseCase,
    pub learning_use_case: LearningUseCase,
    /// 構造化ログ（ファイルへ JSONL）。エラー時のコンソール表示とは別
    pub logger: Arc<dyn Log>,
}

fn build_logger(fs: &Arc<dyn FileSystem>, env: &dyn EnvResolver, verbose: bool) -> Arc<dyn Log> {
    let mut sinks: Vec<Arc<dyn Log>> = Vec::new();
    if let Ok(dirs) = env.resolve_dirs() {
        sinks.push(Arc::new(FileJsonLog::new(Arc::clone(fs), dirs.log_file())));
    }
    if verbose {
        sinks.push(Arc::new(StderrLog));
    }
    Arc::new(FanoutLog::new(sinks))
}

fn build_generator(
    cfg: &AppConfig,
    opts: &WiringOptions,
    env: &dyn EnvResolver,
    logger: &Arc<dyn Log>,
) -> Result<Option<Arc<dyn TextGenerator>>, Error> {
    let provider = opts.provider.as_deref().map(ProviderName::new);
    let model = opts.model.as_deref().map(ModelName::new);
    let resolved = resolve_provider(provider.as_ref(), model.as_ref(), cfg)?;
    match create_driver(&resolved, env) {
        Ok(driver) => Ok(Some(Arc::new(LlmTextGenerator::new(driver)))),
        // API キーが無くても日記・学習は使えるため、解釈時にエラーにする
        Err(e @ Error::Configuration(_)) => {
            let _ = logger.log(
                &LogRecord::new(LogLevel::Warn, "interpretation provider unavailable")
                    .layer("wiring")
                    .kind("config")
                    .field("provider", resolved.provider_type.as_str())
                    .field("error", e.to_string()),
            );
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn build_ad_display(cfg: &AppConfig, logger: &Arc<dyn Log>) -> Arc<dyn AdDisplay> {
    if !cfg.ads.enabled {
        return Arc::new(NoopAdDisplay);
    }
    let display = ConsoleAdDisplay::new();
    let unit_id = cfg.ads.unit_id.as_deref().unwrap_or(default_ad_unit_id());
    if let Err(e) = display.configure(unit_id) {
        let _ = logger.log(
            &LogRecord::new(LogLevel::Warn, "ad configuration failed")
                .layer("wiring")
                .kind("ads")
                .field("error", e.to_string()),
        );
        return Arc::new(NoopAdDisplay);
    }
    Arc::new(display)
}

fn build_share(cfg: &AppConfig, process: Arc<dyn Process>) -> Arc<dyn ShareTarget> {
    match CommandShare::from_command(process, &cfg.share_command) {
        Some(share) => Arc::new(share),
        None => Arc::new(StdoutShare::new()),
    }
}

fn build_confirmation(assume_yes: bool) -> Arc<dyn Confirmation> {
    if assume_yes {
        Arc::new(AssumeYesConfirmation)
    } else if std::io::stdin().is_terminal() {
        Arc::new(CliConfirmation)
    } else {
        Arc::new(NonInteractiveConfirmation)
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_dream(opts: &WiringOptions) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let logger = build_logger(&fs, env_resolver.as_ref(), opts.verbose);
    let dirs = env_resolver.resolve_dirs()?;
    let cfg = AppConfig::load(fs.as_ref(), &dirs.config_file())?;

    let clock: Arc<dyn Clock> = Arc::new(StdClock);
    let id_gen: Arc<dyn IdGenerator> = Arc::new(StdIdGenerator::new(Arc::clone(&clock)));
    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(
        Arc::clone(&fs),
        Arc::clone(&clock),
        dirs.store_dir(),
    ));
    let repo: Arc<dyn DreamRepository> = Arc::new(LoggingDreamRepository::new(
        Arc::new(DreamStore::new(Arc::clone(&store), Arc::clone(&logger))),
        Arc::clone(&logger),
    ));
    let process: Arc<dyn Process> = Arc::new(StdProcess);
    let share = build_share(&cfg, process);

    let ads = AdScheduler::new(
        Arc::clone(&store),
        build_ad_display(&cfg, &logger),
        Arc::clone(&logger),
    );
    let generator = build_generator(&cfg, opts, env_resolver.as_ref(), &logger)?;

    Ok(App {
        interpret_use_case: InterpretUseCase::new(
            ads,
            generator,
            Arc::clone(&repo),
            Arc::clone(&share),
            clock,
            id_gen,
            Arc::clone(&logger),
        ),
        diary_use_case: DiaryUseCase::new(
            repo,
            build_confirmation(opts.assume_yes),
            share,
            Arc::clone(&logger),
        ),
        learning_use_case: LearningUseCase,
        logger,
    })
}
