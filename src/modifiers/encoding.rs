//! Encoding modifiers: `base64`, `base64offset` and `wide`.

use super::{expect_string, ModifierContext, Transformed, ValueModifier, ValueShape};
use crate::error::{ModifierError, Result};
use crate::types::{SigmaString, SigmaValue, StringPart, ValueKind};

use base64::{engine::general_purpose, Engine as _};

const STRING: ValueShape = ValueShape::Plain(ValueKind::String);

/// Characters to cut from the front of the encoding for padding offset `i`.
const START_OFFSETS: [usize; 3] = [0, 2, 3];

/// Characters to cut from the back, indexed by `(len + offset) % 3`.
const END_OFFSETS: [usize; 3] = [0, 3, 2];

fn reject_special(modifier: &str, s: &SigmaString) -> Result<()> {
    if s.contains_special() {
        return Err(ModifierError::value_constraint(
            modifier,
            format!("base64 encoding of strings with wildcards or placeholders is not allowed: '{s}'"),
        ));
    }
    Ok(())
}

/// `base64`: encode the value bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base64Modifier;

impl ValueModifier for Base64Modifier {
    const IDENTIFIER: &'static str = "base64";
    const SHAPE: ValueShape = STRING;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        let s = expect_string(Self::IDENTIFIER, value)?;
        reject_special(Self::IDENTIFIER, &s)?;
        let encoded = general_purpose::STANDARD.encode(s.to_bytes());
        Ok(SigmaValue::String(plain_string(encoded)).into())
    }
}

/// `base64offset`: the three alignment-independent base64 forms of the value.
///
/// A byte string embedded in a larger base64 stream starts at one of three
/// positions within a 3-byte group. For each, the value is left-padded with
/// that many spaces, encoded, and the characters influenced by the padding
/// or by whatever follows the value are cut off.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base64OffsetModifier;

impl ValueModifier for Base64OffsetModifier {
    const IDENTIFIER: &'static str = "base64offset";
    const SHAPE: ValueShape = STRING;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        let s = expect_string(Self::IDENTIFIER, value)?;
        reject_special(Self::IDENTIFIER, &s)?;
        let variants = base64_offset_variants(&s.to_bytes())
            .into_iter()
            .map(|v| SigmaValue::String(plain_string(v)))
            .collect::<Vec<_>>();
        Ok(variants.into())
    }
}

/// Always returns exactly three strings, for padding offsets 0, 1 and 2.
/// A variant is empty when the trims overlap (very short inputs).
pub fn base64_offset_variants(bytes: &[u8]) -> Vec<String> {
    (0..3usize)
        .map(|offset| {
            let mut padded = vec![b' '; offset];
            padded.extend_from_slice(bytes);
            let encoded = general_purpose::STANDARD.encode(&padded);

            let start = START_OFFSETS[offset];
            let end = encoded
                .len()
                .saturating_sub(END_OFFSETS[(bytes.len() + offset) % 3]);
            if start < end {
                encoded[start..end].to_string()
            } else {
                String::new()
            }
        })
        .collect()
}

/// `wide`: UTF-16LE widening, each ASCII character followed by a NUL.
///
/// Wildcards and placeholders pass through unchanged. Non-ASCII input cannot
/// be represented this way and is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct WideModifier;

impl ValueModifier for WideModifier {
    const IDENTIFIER: &'static str = "wide";
    const SHAPE: ValueShape = STRING;

    fn modify(&self, _ctx: &ModifierContext<'_>, value: SigmaValue) -> Result<Transformed> {
        let s = expect_string(Self::IDENTIFIER, value)?;
        let mut parts = Vec::with_capacity(s.parts().len());

        for part in s.parts() {
            match part {
                StringPart::Plain(text) => {
                    if !text.is_ascii() {
                        return Err(ModifierError::value_constraint(
                            Self::IDENTIFIER,
                            format!("wide modifier only allowed for ascii strings, input string '{s}' isn't one"),
                        ));
                    }
                    let mut wide = String::with_capacity(text.len() * 2);
                    for c in text.chars() {
                        wide.push(c);
                        wide.push('\0');
                    }
                    parts.push(StringPart::Plain(wide));
                }
                other => parts.push(other.clone()),
            }
        }

        Ok(SigmaValue::String(SigmaString::from_parts(parts)).into())
    }
}

fn plain_string(text: String) -> SigmaString {
    SigmaString::from_parts([StringPart::Plain(text)])
}
