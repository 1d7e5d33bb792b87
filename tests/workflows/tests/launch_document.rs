use std::{collections::HashSet, io::Write as _};

use launch_gen::GenerateOptions;
use tests_workflows::{document_ports, generate_document};

#[test]
fn default_document_has_expected_shape() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let document = generate_document(&GenerateOptions::default(), &dir.path().join("launch.json"))?;

    assert_eq!(document["relaychain"]["nodes"].as_array().map(Vec::len), Some(6));
    assert_eq!(document["parachains"][0]["id"], "2102");
    assert_eq!(document["simpleParachains"], serde_json::json!([]));
    assert_eq!(document["hrmpChannels"], serde_json::json!([]));
    assert_eq!(document["types"], serde_json::json!({}));
    assert_eq!(document["finalization"], false);

    let bob = &document["relaychain"]["nodes"][1];
    assert_eq!(bob["name"], "bob");
    assert_eq!(
        (&bob["port"], &bob["rpcPort"], &bob["wsPort"]),
        (&serde_json::json!(30301), &serde_json::json!(9901), &serde_json::json!(9915))
    );
    assert!(bob.get("basePath").is_none());
    Ok(())
}

#[test]
fn ports_are_unique_across_a_multi_parachain_fleet() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let fleet_path = dir.path().join("fleet.yaml");
    let mut fleet = std::fs::File::create(&fleet_path)?;
    write!(
        fleet,
        r#"
parachains:
  - name: imbue
    id: 2102
    balance: "1000000000000000000000"
    bin: /imbue
    chain: imbue-dev
    nodes: [alice, bob, charlie]
  - name: sibling
    id: 2103
    balance: "1"
    bin: /sibling
    chain: sibling-dev
    nodes: [alice, bob]
"#
    )?;

    let options = GenerateOptions {
        config: Some(fleet_path),
        base_path_root: Some(dir.path().join("nodes")),
    };
    let document = generate_document(&options, &dir.path().join("launch.json"))?;

    let ports = document_ports(&document);
    assert_eq!(ports.len(), (6 + 3 + 2) * 3);
    assert_eq!(ports.iter().collect::<HashSet<_>>().len(), ports.len());

    let sibling_primary = &document["parachains"][1]["nodes"][0];
    assert_eq!(sibling_primary["flags"][0], "--prometheus-port=9611");
    assert!(
        sibling_primary["basePath"]
            .as_str()
            .is_some_and(|path| path.ends_with("alice-sibling"))
    );
    Ok(())
}

#[test]
fn repeated_runs_write_identical_documents() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let options = GenerateOptions {
        config: None,
        base_path_root: Some("/srv/launch".into()),
    };

    generate_document(&options, &dir.path().join("first.json"))?;
    generate_document(&options, &dir.path().join("second.json"))?;

    assert_eq!(
        std::fs::read(dir.path().join("first.json"))?,
        std::fs::read(dir.path().join("second.json"))?
    );
    Ok(())
}
