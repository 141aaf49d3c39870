use colored::Colorize;
use holomine_core::contract::{EncryptionResult, MiningResult};
use holomine_core::explain_result;
use holomine_core::session::DatasetInput;

/// Characters of ciphertext shown before truncating.
const CIPHERTEXT_PREVIEW_CHARS: usize = 200;

pub fn print_input(input: &DatasetInput) {
    println!(
        "{} {} ({:.2} KB)",
        "Selected:".bold(),
        input.file_name(),
        input.size_kib()
    );
}

pub fn print_encryption(result: &EncryptionResult) {
    println!("\n{}", "🔐 Encryption complete".green().bold());
    println!("  {:<12} {}", "Algorithm:".bold(), result.algorithm);
    println!("  {:<12} {} bits", "Key size:".bold(), result.key_size);
    println!("  {:<12} {}", "Records:".bold(), result.record_count);
    println!("  {:<12} {}", "Session:".bold(), result.session_id_preview());
    println!(
        "  {:<12} {} ({} chars)",
        "Ciphertext:".bold(),
        result.ciphertext_preview(CIPHERTEXT_PREVIEW_CHARS).dimmed(),
        result.ciphertext_len()
    );
    if let Ok(bytes) = result.decode_ciphertext() {
        println!("  {:<12} {} bytes", "Decoded:".bold(), bytes.len());
    }
}

pub fn print_mining(result: &MiningResult) {
    println!("\n{}", "⛏  Mining complete".green().bold());
    println!("  {:<16} {}", "Algorithm:".bold(), result.algorithm);
    println!(
        "  {:<16} {:.2} ms",
        "Execution time:".bold(),
        result.execution_time
    );
    println!("  {:<16} {}", "Privacy level:".bold(), result.privacy_level);

    println!("\n{}", "Discovered patterns".bold().underline());
    for explained in explain_result(result) {
        println!("  {}. {}", explained.ordinal, explained.pattern);
        println!("     {}", explained.caption.dimmed());
    }
}

/// Reminds the user that labels and privacy claims come from the backend.
pub fn print_trust_notice(base_url: &str) {
    println!(
        "\n{}",
        format!(
            "Scheme labels and privacy level are reported by {base_url}; they are not verified locally."
        )
        .yellow()
    );
}
