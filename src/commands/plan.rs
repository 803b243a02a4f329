//! # plan 命令实现
//!
//! 只计算分块，不调用 git。输出分块表格，可选写入逐文件 CSV 清单。
//!
//! ## 依赖关系
//! - 使用 `cli/plan.rs` 定义的参数
//! - 使用 `batch/`, `utils/output.rs`, `utils/progress.rs`

use crate::batch::{Dispatcher, PlanHandler};
use crate::cli::plan::PlanArgs;
use crate::error::Result;
use crate::utils::{output, progress};

/// 执行 plan 命令
pub fn execute(args: PlanArgs) -> Result<()> {
    output::print_header("Chunk Plan");

    let config = super::dispatch_config(&args.chunk)?;
    super::print_settings(&args.chunk);

    let spinner = progress::create_spinner("Walking directory tree...");
    let mut dispatcher = Dispatcher::new(config, PlanHandler::new(args.manifest));
    let result = dispatcher.traverse(&args.chunk.root);
    spinner.finish_and_clear();
    let stats = result?;

    let handler = dispatcher.handler();
    if handler.chunks() == 0 {
        output::print_warning("No files to plan.");
    } else {
        println!("{}", handler.table());
    }

    if let Some(path) = handler.manifest_path() {
        output::print_success(&format!("Manifest saved to '{}'", path.display()));
    }

    super::print_stats(&stats);

    Ok(())
}
