use std::process;

use clap::Parser;
use corpusforge::convert::Converter;

/// 📚 CorpusForge - EPUB语料提取工具
#[derive(Parser)]
#[command(name = "corpusforge")]
#[command(about = "将EPUB电子书批量提取为纯文本语料目录树")]
#[command(version)]
struct Args {
    /// EPUB文件的匹配模式
    #[arg(help = "要转换的EPUB文件匹配模式，例如 books/*.epub")]
    pattern: String,
}

fn main() {
    let args = Args::parse();

    println!("📚 CorpusForge - EPUB语料提取工具");

    let paths = match glob::glob(&args.pattern) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("❌ 无效的匹配模式 {}: {}", args.pattern, e);
            process::exit(1);
        }
    };

    let converter = Converter::new();
    let mut converted = 0u32;
    let mut failed = 0u32;

    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                eprintln!("❌ 无法访问匹配到的文件: {}", e);
                failed += 1;
                continue;
            }
        };

        println!("\n📖 正在处理: {}", path.display());

        // 单本书的失败不影响批量转换中的其他书
        match converter.convert_file(&path) {
            Ok(summary) => {
                converted += 1;
                println!(
                    "✅ 《{}》转换完成: {} 个部, {} 个章节, 输出目录: {}",
                    summary.title,
                    summary.part_count,
                    summary.chapter_count,
                    summary.output_dir.display()
                );
                if summary.excluded_count > 0 || summary.skipped_count > 0 {
                    println!(
                        "   跳过 {} 个排除章节, {} 个未识别导航点",
                        summary.excluded_count, summary.skipped_count
                    );
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("❌ 转换失败 {}: {}", path.display(), e);
            }
        }
    }

    if converted == 0 && failed == 0 {
        println!("⚠️  没有找到与模式匹配的文件: {}", args.pattern);
    } else {
        println!("\n🎉 处理完成: 成功 {} 本, 失败 {} 本", converted, failed);
    }
}
