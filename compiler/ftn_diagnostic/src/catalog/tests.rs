use super::*;
use pretty_assertions::assert_eq;

#[test]
fn identity_returns_msgid() {
    let catalog = IdentityCatalog;
    assert_eq!(catalog.lookup("Syntax error at %C"), None);
    assert_eq!(catalog.translate("Syntax error at %C"), "Syntax error at %C");
}

#[test]
fn table_translates_known_ids_only() {
    let mut table = TranslationTable::default();
    table.insert(
        "'%s' at %L is not a variable".to_string(),
        "%2$L: '%1$s' n'est pas une variable".to_string(),
    );

    assert_eq!(
        table.translate("'%s' at %L is not a variable"),
        "%2$L: '%1$s' n'est pas une variable"
    );
    assert_eq!(table.translate("Unclassifiable statement at %C"), "Unclassifiable statement at %C");
}

#[test]
fn usable_as_trait_object() {
    let catalog: Box<dyn MessageCatalog> = Box::new(IdentityCatalog);
    assert_eq!(catalog.translate("x"), "x");
}
