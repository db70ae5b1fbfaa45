//! Text, CSV, JSON and source-code renderings of a lookup table

use std::fmt::Write;

use serde::Serialize;
use thermistor::{Ntc, TableValue};

/// Compiler flags a consumer of the generated C++ header needs
pub const CXX_FLAGS: &[&str] = &["-std=c++17"];

const VALUES_PER_LINE: usize = 8;

#[derive(Debug, Serialize)]
struct TableDocument<'a> {
    name: &'a str,
    value_type: &'static str,
    min_celsius: f64,
    max_celsius: f64,
    delta: f64,
    entries: Vec<Entry>,
}

#[derive(Debug, Serialize)]
struct Entry {
    celsius: f64,
    value: f64,
}

/// Aligned two-column listing
pub fn text<V: TableValue>(lut: &Ntc<V>, unit: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>10}  {:>14}", "celsius", unit);
    for (celsius, value) in lut.entries() {
        let _ = writeln!(out, "{:>10.3}  {:>14}", celsius, value);
    }
    out
}

pub fn csv<V: TableValue>(lut: &Ntc<V>) -> String {
    let mut out = String::from("celsius,value\n");
    for (celsius, value) in lut.entries() {
        let _ = writeln!(out, "{},{}", celsius, value);
    }
    out
}

pub fn json<V: TableValue>(name: &str, lut: &Ntc<V>) -> serde_json::Result<String> {
    let document = TableDocument {
        name,
        value_type: V::TYPE_NAME,
        min_celsius: lut.range().min(),
        max_celsius: lut.range().max(),
        delta: lut.delta(),
        entries: lut
            .entries()
            .map(|(celsius, value)| Entry {
                celsius,
                value: value.to_f64(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&document)
}

/// Rust module with the table as a `const` array
pub fn rust<V: TableValue>(name: &str, lut: &Ntc<V>) -> String {
    let ident = identifier(name).to_uppercase();
    let mut out = String::new();

    let _ = writeln!(out, "// Generated by thermistor {} from `{}`", thermistor::VERSION, name);
    let _ = writeln!(out);
    let _ = writeln!(out, "pub const {}_MIN_CELSIUS: f64 = {:?};", ident, lut.range().min());
    let _ = writeln!(out, "pub const {}_MAX_CELSIUS: f64 = {:?};", ident, lut.range().max());
    let _ = writeln!(out, "pub const {}_DELTA: f64 = {:?};", ident, lut.delta());
    let _ = writeln!(out);
    let _ = writeln!(out, "pub const {}: [{}; {}] = [", ident, V::TYPE_NAME, lut.len());
    write_values(&mut out, lut, "    ", |value| format!("{:?}", value));
    let _ = writeln!(out, "];");
    out
}

/// Self-contained C++ header with the table as a `constexpr std::array`
pub fn cpp<V: TableValue>(name: &str, lut: &Ntc<V>) -> String {
    let ident = identifier(name).to_lowercase();
    let ty = cpp_type(V::TYPE_NAME);
    let float_suffix = if V::TYPE_NAME == "f32" { "f" } else { "" };
    let mut out = String::new();

    let _ = writeln!(out, "// Generated by thermistor {} from `{}`", thermistor::VERSION, name);
    let _ = writeln!(out, "// Requires: {}", CXX_FLAGS.join(" "));
    let _ = writeln!(out);
    let _ = writeln!(out, "#pragma once");
    let _ = writeln!(out);
    let _ = writeln!(out, "#include <array>");
    let _ = writeln!(out, "#include <cstdint>");
    let _ = writeln!(out);
    let _ = writeln!(out, "namespace thermistor::{} {{", ident);
    let _ = writeln!(out, "    inline constexpr double min_celsius = {:?};", lut.range().min());
    let _ = writeln!(out, "    inline constexpr double max_celsius = {:?};", lut.range().max());
    let _ = writeln!(out, "    inline constexpr double delta = {:?};", lut.delta());
    let _ = writeln!(out);
    let _ = writeln!(out, "    inline constexpr std::array<{}, {}> table{{", ty, lut.len());
    write_values(&mut out, lut, "        ", |value| format!("{:?}{}", value, float_suffix));
    let _ = writeln!(out, "    }};");
    let _ = writeln!(out, "}} // namespace thermistor::{}", ident);
    out
}

fn write_values<V, F>(out: &mut String, lut: &Ntc<V>, indent: &str, literal: F)
where
    V: TableValue,
    F: Fn(V) -> String,
{
    for chunk in lut.as_slice().chunks(VALUES_PER_LINE) {
        let line: Vec<String> = chunk.iter().map(|value| literal(*value)).collect();
        let _ = writeln!(out, "{}{},", indent, line.join(", "));
    }
}

fn cpp_type(type_name: &str) -> &'static str {
    match type_name {
        "u8" => "std::uint8_t",
        "u16" => "std::uint16_t",
        "u32" => "std::uint32_t",
        "u64" => "std::uint64_t",
        "i16" => "std::int16_t",
        "i32" => "std::int32_t",
        "i64" => "std::int64_t",
        "f32" => "float",
        _ => "double",
    }
}

/// Rust and C++ keywords, compared in lowercase
const RESERVED: &[&str] = &[
    "abstract", "alignas", "alignof", "and", "as", "asm", "async", "auto", "await", "become",
    "bool", "box", "break", "case", "catch", "char", "class", "const", "constexpr", "continue",
    "crate", "default", "delete", "do", "double", "dyn", "else", "enum", "explicit", "export",
    "extern", "false", "final", "float", "fn", "for", "friend", "gen", "goto", "if", "impl", "in",
    "inline", "int", "let", "long", "loop", "macro", "match", "mod", "move", "mut", "namespace",
    "new", "noexcept", "not", "nullptr", "operator", "or", "override", "priv", "private",
    "protected", "pub", "ref", "register", "return", "self", "short", "signed", "sizeof",
    "static", "struct", "super", "switch", "template", "this", "throw", "trait", "true", "try",
    "type", "typedef", "typeid", "typename", "typeof", "union", "unsafe", "unsigned", "unsized",
    "use", "using", "virtual", "void", "volatile", "where", "while", "xor", "yield",
];

/// Turn a description name into a valid identifier
pub fn identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED.contains(&ident.to_lowercase().as_str()) {
        ident.push('_');
    }
    ident
}
