/// Index of a repeating interval that has been ticking for `elapsed_ms`.
///
/// Used for secondary loops gated by a phase or a toggle, such as switching preview frames every
/// 3s while a video plays. Returns 0 for a zero period or modulo.
pub fn interval_index(elapsed_ms: u64, period_ms: u64, modulo: usize) -> usize {
    if period_ms == 0 || modulo == 0 {
        return 0;
    }
    ((elapsed_ms / period_ms) % modulo as u64) as usize
}

/// Prefix of `text` revealed after `elapsed_ms` at one character per `per_char_ms`.
///
/// Characters are Unicode scalar values, so CJK copy reveals one glyph at a time.
pub fn typewriter(text: &str, elapsed_ms: u64, per_char_ms: u64) -> &str {
    let per_char_ms = per_char_ms.max(1);
    let shown = usize::try_from(elapsed_ms / per_char_ms).unwrap_or(usize::MAX);
    match text.char_indices().nth(shown) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/subclock.rs"]
mod tests;
