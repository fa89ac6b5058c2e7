mod common;

use mapscope_core::error::MappingError;
use mapscope_core::{
    MappingTable, ParseOptions, PeekableLines, Result, parse_flat, parse_retrace,
};
use std::io::{self, BufRead, BufReader, Read};

fn flat(classes: &str, members: Option<&str>) -> Result<MappingTable> {
    let mut classes = PeekableLines::from_text(classes);
    let mut members = members.map(PeekableLines::from_text);
    parse_flat(
        &mut classes,
        members
            .as_mut()
            .map(|m| m as &mut dyn mapscope_core::LineSource),
        &ParseOptions::default(),
    )
}

fn retrace(text: &str) -> Result<MappingTable> {
    parse_retrace(&mut PeekableLines::from_text(text), &ParseOptions::default())
}

#[test]
fn test_every_class_round_trips() {
    let table = flat(common::COMMUNITY_CLASSES, None).unwrap();
    assert_eq!(table.len(), 4);
    for class in table.classes() {
        let by_obf = table.class_by_obfuscated_name(class.obfuscated_name()).unwrap();
        let by_decl = table.class_by_declared_name(class.declared_name()).unwrap();
        assert_eq!(by_obf.declared_name(), class.declared_name());
        assert_eq!(by_decl.obfuscated_name(), class.obfuscated_name());
    }

    let table = retrace(common::CANONICAL).unwrap();
    assert_eq!(table.len(), 4);
    for class in table.classes() {
        assert!(table.has_obfuscated_class(class.obfuscated_name()));
        assert!(table.has_declared_class(class.declared_name()));
    }
}

#[test]
fn test_field_inverse_law() {
    let table = retrace(common::CANONICAL).unwrap();
    for class in table.classes() {
        for (obfuscated, declared) in class.fields() {
            assert_eq!(class.obfuscate_field(declared), Some(obfuscated));
            assert_eq!(class.deobfuscate_field(obfuscated), Some(declared));
        }
    }
}

#[test]
fn test_flat_members_and_stats() {
    let table = flat(common::COMMUNITY_CLASSES, Some(common::COMMUNITY_MEMBERS)).unwrap();
    let block = table
        .class_by_declared_name("net.minecraft.server.Block")
        .unwrap();
    assert_eq!(block.deobfuscate_field("f"), Some("strength"));
    let tick = block.methods_by_obfuscated_name("m").next().unwrap();
    assert_eq!(tick.parameter_types, vec!["integer"]);
    assert_eq!(tick.return_type, "void");

    let stats = table.stats();
    assert_eq!(stats.classes, 4);
    assert_eq!(stats.fields, 1);
    assert_eq!(stats.methods, 1);
    assert_eq!(stats.unresolved_members, 1);
}

#[test]
fn test_retrace_overloads_and_constructors() {
    let table = retrace(common::CANONICAL).unwrap();
    let block = table.class_by_obfuscated_name("a").unwrap();
    let overloads: Vec<_> = block.methods_by_obfuscated_name("m").collect();
    assert_eq!(overloads.len(), 2);
    assert_eq!(overloads[0].declared_name, "randomTick");
    assert_eq!(overloads[1].declared_name, "tick");
    assert!(block.methods().iter().all(|m| m.declared_name != "<init>"));
    assert_eq!(table.stats().constructors_skipped, 1);

    let can_survive = block.methods_by_declared_name("canSurvive").next().unwrap();
    assert_eq!(
        can_survive.parameter_types,
        vec!["net.minecraft.world.level.Level", "integer[]"]
    );
}

#[test]
fn test_both_grammars_agree_on_types() {
    let flat_table = flat(
        "a pkg/Holder",
        Some("pkg/Holder x ([[ILjava/lang/String;)Z check"),
    )
    .unwrap();
    let retrace_table = retrace("pkg.Holder -> a:\n    boolean check(int[][],java.lang.String) -> x\n").unwrap();

    let from_flat = flat_table
        .class_by_obfuscated_name("a")
        .unwrap()
        .methods_by_obfuscated_name("x")
        .next()
        .unwrap()
        .clone();
    let from_retrace = retrace_table
        .class_by_obfuscated_name("a")
        .unwrap()
        .methods_by_obfuscated_name("x")
        .next()
        .unwrap()
        .clone();
    assert_eq!(from_flat, from_retrace);
}

struct BrokenAfter {
    inner: &'static [u8],
}

impl Read for BrokenAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.inner.is_empty() {
            return Err(io::Error::other("disk went away"));
        }
        let n = self.inner.read(buf)?;
        Ok(n)
    }
}

#[test]
fn test_read_failure_fails_the_parse() {
    let reader: Box<dyn BufRead> = Box::new(BufReader::new(BrokenAfter {
        inner: b"com.example.Foo -> a:\n    int bar() -> b\n",
    }));
    let err = parse_retrace(&mut PeekableLines::new(reader), &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, MappingError::Io(_)));
}
