use std::fs::File;

use indoc::indoc;
use prefstore_core::{Error, Partition, PreferenceStore, PreferenceTree};
use prefstore_xml::{
    import_preferences, import_preferences_from_str, parse_document, FormatError, ImportError,
};

fn trees() -> (PreferenceTree, PreferenceTree) {
    (
        PreferenceTree::new(Partition::User),
        PreferenceTree::new(Partition::System),
    )
}

#[test]
fn flat_map_imports_into_root() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="1.0">
          <root type="user">
            <map>
              <entry key="k1" value="v1"/>
              <entry key="k2" value="v2"/>
            </map>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    import_preferences_from_str(xml, &mut user, &mut system).unwrap();

    let root = user.root();
    let mut keys = user.list_keys(root);
    keys.sort();
    assert_eq!(keys, vec!["k1".to_string(), "k2".to_string()]);
    assert_eq!(user.get(root, "k1"), Some("v1"));
    assert_eq!(user.get(root, "k2"), Some("v2"));
    assert_eq!(user.node_count(), 1);
}

#[test]
fn nested_node_imports_into_child() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="1.0">
          <root type="user">
            <map/>
            <node name="a">
              <map><entry key="k" value="v"/></map>
            </node>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    import_preferences_from_str(xml, &mut user, &mut system).unwrap();

    let root = user.root();
    let a = user.get_or_create_child(root, "a").unwrap();
    assert_eq!(user.get(a, "k"), Some("v"));
    assert!(user.list_keys(root).is_empty());
}

#[test]
fn later_duplicate_key_wins() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="1.0">
          <root type="system">
            <map>
              <entry key="k" value="first"/>
              <entry key="other" value="x"/>
              <entry key="k" value="last"/>
            </map>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    import_preferences_from_str(xml, &mut user, &mut system).unwrap();
    assert_eq!(system.get(system.root(), "k"), Some("last"));
    assert_eq!(system.list_keys(system.root()).len(), 2);
}

#[test]
fn repeated_node_blocks_merge() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences>
          <root type="user">
            <map/>
            <node name="a"><map><entry key="x" value="1"/></map></node>
            <node name="a"><map><entry key="y" value="2"/></map></node>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    import_preferences_from_str(xml, &mut user, &mut system).unwrap();
    let a = user.child(user.root(), "a").unwrap();
    assert_eq!(user.get(a, "x"), Some("1"));
    assert_eq!(user.get(a, "y"), Some("2"));
    assert_eq!(user.node_count(), 2);
}

#[test]
fn import_adds_to_existing_tree() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="1.0">
          <root type="user">
            <map><entry key="imported" value="yes"/></map>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    let root = user.root();
    user.put(root, "existing", "kept");
    user.put(root, "imported", "no");
    import_preferences_from_str(xml, &mut user, &mut system).unwrap();
    assert_eq!(user.get(root, "existing"), Some("kept"));
    assert_eq!(user.get(root, "imported"), Some("yes"));
}

#[test]
fn escaped_values_are_decoded() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="1.0">
          <root type="user">
            <map><entry key="a&amp;b" value="&quot;quoted&quot; &lt;tag&gt;"/></map>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    import_preferences_from_str(xml, &mut user, &mut system).unwrap();
    assert_eq!(user.get(user.root(), "a&b"), Some("\"quoted\" <tag>"));
}

#[test]
fn literal_whitespace_in_values_is_normalized() {
    let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
        <!DOCTYPE preferences SYSTEM \"http://java.sun.com/dtd/preferences.dtd\">\n\
        <preferences EXTERNAL_XML_VERSION=\"1.0\">\n\
          <root type=\"user\"><map>\n\
            <entry key=\"literal\" value=\"a\nb\tc\"/>\n\
            <entry key=\"crlf\" value=\"d\r\ne\"/>\n\
            <entry key=\"referenced\" value=\"x&#10;y\"/>\n\
          </map></root>\n\
        </preferences>\n";
    let (mut user, mut system) = trees();
    import_preferences_from_str(xml, &mut user, &mut system).unwrap();

    let root = user.root();
    assert_eq!(user.get(root, "literal"), Some("a b c"));
    assert_eq!(user.get(root, "crlf"), Some("d e"));
    assert_eq!(user.get(root, "referenced"), Some("x\ny"));
}

#[test]
fn deeply_nested_document_imports() {
    let depth = 10_000;
    let mut body = r#"<node name="n"><map/>"#.repeat(depth - 1);
    body.push_str(r#"<node name="n"><map><entry key="depth" value="10000"/></map>"#);
    body.push_str(&"</node>".repeat(depth));
    let xml = format!(
        "{}{}{}{}",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
<preferences EXTERNAL_XML_VERSION="1.0"><root type="user"><map/>"#,
        body,
        "</root>",
        "</preferences>"
    );

    let document = parse_document(xml.as_bytes()).unwrap();
    assert_eq!(document.tree.block_count(), depth + 1);

    let (mut user, mut system) = trees();
    import_preferences_from_str(&xml, &mut user, &mut system).unwrap();
    assert_eq!(user.node_count(), depth + 1);

    let mut node = user.root();
    for _ in 0..depth {
        node = user.child(node, "n").unwrap();
    }
    assert_eq!(user.get(node, "depth"), Some("10000"));
    assert!(user.child(node, "n").is_none());
}

#[test]
fn newer_version_fails_without_mutation() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="2.0">
          <root type="user">
            <map><entry key="k" value="v"/></map>
            <node name="a"><map/></node>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    let err = import_preferences_from_str(xml, &mut user, &mut system).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedVersion { .. }));
    assert!(user.list_keys(user.root()).is_empty());
    assert_eq!(user.node_count(), 1);
    assert_eq!(system.node_count(), 1);
}

#[test]
fn foreign_external_reference_fails_without_mutation() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://attacker.example/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="1.0">
          <root type="user">
            <map><entry key="k" value="v"/></map>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    let err = import_preferences_from_str(xml, &mut user, &mut system).unwrap_err();
    assert!(matches!(
        err,
        ImportError::InvalidFormat(FormatError::UnrecognizedSystemId(_))
    ));
    assert!(user.list_keys(user.root()).is_empty());
}

#[test]
fn missing_name_is_invalid_format() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="1.0">
          <root type="user">
            <map><entry key="k" value="v"/></map>
            <node><map/></node>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    let err = import_preferences_from_str(xml, &mut user, &mut system).unwrap_err();
    assert!(matches!(err, ImportError::InvalidFormat(FormatError::Structure { .. })));
    assert!(user.list_keys(user.root()).is_empty());
}

#[test]
fn not_well_formed_is_invalid_format() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="1.0">
          <root type="user">
            <map><entry key="k" value="v"></map>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    let err = import_preferences_from_str(xml, &mut user, &mut system).unwrap_err();
    assert!(matches!(err, ImportError::InvalidFormat(_)));
}

#[test]
fn separator_in_node_name_is_invalid_name() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="1.0">
          <root type="user">
            <map/>
            <node name="a/b"><map/></node>
          </root>
        </preferences>
    "#};
    let (mut user, mut system) = trees();
    let err = import_preferences_from_str(xml, &mut user, &mut system).unwrap_err();
    assert!(matches!(err, ImportError::Store(Error::InvalidName { .. })));
}

#[test]
fn fixture_file_imports_deep_tree() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/rfa-preferences.xml");
    let file = File::open(path).unwrap();
    let (mut user, mut system) = trees();
    import_preferences(file, &mut user, &mut system).unwrap();

    let root = user.root();
    assert!(user
        .node_exists(root, "/com/reuters/rfa/AddicticksNamespace/Connections/TREPProd")
        .unwrap());
    let prod = user
        .find(root, "/com/reuters/rfa/AddicticksNamespace/Connections/TREPProd")
        .unwrap()
        .unwrap();
    assert_eq!(user.get(prod, "serverList"), Some("trep-prod-1 trep-prod-2"));
    assert_eq!(user.get(prod, "portNumber"), Some("14002"));
    assert_eq!(system.node_count(), 1);
}

/// Wraps a tree and records every structural operation in order.
struct Recording {
    tree: PreferenceTree,
    log: Vec<String>,
}

impl PreferenceStore for Recording {
    type Node = prefstore_core::NodeId;

    fn root(&self) -> Self::Node {
        self.tree.root()
    }

    fn is_user_node(&self, node: Self::Node) -> bool {
        self.tree.is_user_node(node)
    }

    fn get_or_create_child(&mut self, parent: Self::Node, name: &str) -> Result<Self::Node, Error> {
        let child = self.tree.get_or_create_child(parent, name)?;
        self.log.push(format!("child {}", self.tree.absolute_path(child)));
        Ok(child)
    }

    fn list_child_names(&self, node: Self::Node) -> Vec<String> {
        self.tree.list_child_names(node)
    }

    fn list_keys(&self, node: Self::Node) -> Vec<String> {
        self.tree.list_keys(node)
    }

    fn get(&self, node: Self::Node, key: &str) -> Option<&str> {
        self.tree.get(node, key)
    }

    fn put(&mut self, node: Self::Node, key: &str, value: &str) {
        self.log
            .push(format!("put {} {}={}", self.tree.absolute_path(node), key, value));
        self.tree.put(node, key, value);
    }

    fn remove(&mut self, node: Self::Node, key: &str) {
        self.tree.remove(node, key);
    }

    fn remove_all_entries(&mut self, node: Self::Node) {
        self.tree.remove_all_entries(node);
    }
}

#[test]
fn siblings_resolved_before_descending() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE preferences SYSTEM "http://java.sun.com/dtd/preferences.dtd">
        <preferences EXTERNAL_XML_VERSION="1.0">
          <root type="user">
            <map><entry key="r" value="0"/></map>
            <node name="a">
              <map><entry key="x" value="1"/></map>
              <node name="c"><map/></node>
            </node>
            <node name="b">
              <map><entry key="y" value="2"/></map>
            </node>
          </root>
        </preferences>
    "#};
    let mut user = Recording {
        tree: PreferenceTree::new(Partition::User),
        log: Vec::new(),
    };
    let mut system = Recording {
        tree: PreferenceTree::new(Partition::System),
        log: Vec::new(),
    };
    import_preferences_from_str(xml, &mut user, &mut system).unwrap();

    assert_eq!(
        user.log,
        vec![
            "put / r=0",
            "child /a",
            "child /b",
            "put /a x=1",
            "child /a/c",
            "put /b y=2",
        ]
    );
    assert!(system.log.is_empty());
}
