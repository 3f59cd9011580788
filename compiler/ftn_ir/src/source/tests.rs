use super::*;
use pretty_assertions::assert_eq;

#[test]
fn line_drops_terminator() {
    let file = SourceFile::root("a.f90");
    assert_eq!(SourceLine::new(&file, 1, "x = 1\n").chars().len(), 5);
    assert_eq!(SourceLine::new(&file, 2, "x = 1\r\n").chars().len(), 5);
    assert_eq!(SourceLine::new(&file, 3, "x = 1").chars().len(), 5);
}

#[test]
fn line_counts_characters_not_bytes() {
    let file = SourceFile::root("a.f90");
    let line = SourceLine::new(&file, 1, "s = 'é'");
    assert_eq!(line.chars().len(), 7);
    assert_eq!(line.chars()[5], 'é');
}

#[test]
fn include_chain_walks_outward() {
    let main = SourceFile::root("main.f90");
    let mid = SourceFile::included("mid.inc", &main, 12);
    let inner = SourceFile::included("inner.inc", &mid, 3);

    let chain: Vec<_> = inner
        .include_chain()
        .map(|(file, line)| (file.name().to_string(), line))
        .collect();

    assert_eq!(
        chain,
        vec![("mid.inc".to_string(), 3), ("main.f90".to_string(), 12)]
    );
}

#[test]
fn include_chain_of_root_is_empty() {
    let main = SourceFile::root("main.f90");
    assert_eq!(main.include_chain().count(), 0);
}

#[test]
fn locus_identity_is_by_line_buffer() {
    let file = SourceFile::root("a.f90");
    let first = SourceLine::new(&file, 1, "x = 1");
    let twin = SourceLine::new(&file, 1, "x = 1");

    assert!(Locus::new(&first, 2).same_line(&Locus::new(&first, 4)));
    assert!(!Locus::new(&first, 2).same_line(&Locus::new(&twin, 2)));
    assert_eq!(Locus::new(&first, 2), Locus::new(&first, 2));
    assert_ne!(Locus::new(&first, 2), Locus::new(&twin, 2));
}

#[test]
fn locus_display_uses_one_based_column() {
    let file = SourceFile::root("prog.f");
    let line = SourceLine::new(&file, 10, "      x = y");
    let locus = Locus::new(&line, 6);
    assert_eq!(locus.line_col(), (10, 7));
    assert_eq!(locus.to_string(), "prog.f:10:7");
}
