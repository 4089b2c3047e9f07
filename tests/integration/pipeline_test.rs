//! Integration tests for the full parse/transform/serialize pipeline

use std::fs;

use jmdict2json::convert::engine::scan_entities;
use jmdict2json::{
    convert_file, parse_entries, render_entries, ConvertConfig, NullProgress, OutputMode,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

/// A small but structurally complete dictionary: entity declarations in the
/// header, stray structural lines, a multi-block entry, a katakana-only
/// entry, and sense fields in scrambled input order.
const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- JMdict created: 2024-06-01 -->
<!-- <pos> (part of speech) entities -->
<!ENTITY v5k "Godan verb with ku ending">
<!ENTITY n "noun (common)">
<!-- <dial> (dialect) entities -->
<!ENTITY ksb "Kansai-ben">
<!-- end of entity block -->
<JMdict>
<entry>
<ent_seq>1000</ent_seq>
<k_ele>
<keb>書く</keb>
<ke_pri>ichi1</ke_pri>
</k_ele>
<r_ele>
<reb>かく</reb>
<re_pri>ichi1</re_pri>
</r_ele>
<sense>
<gloss>to write</gloss>
<pos>&v5k;</pos>
<dial>&ksb;</dial>
</sense>
<sense>
<stagk>書く</stagk>
<gloss>to compose</gloss>
</sense>
</entry>
<entry>
<ent_seq>1001</ent_seq>
<r_ele>
<reb>パン</reb>
<re_nokanji/>
</r_ele>
<sense>
<pos>&n;</pos>
<lsource xml:lang="por">pão</lsource>
<lsource>untagged origin</lsource>
<gloss>bread</gloss>
</sense>
</entry>
</JMdict>
"#;

#[test]
fn test_in_memory_output_round_trips_through_serde_json() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("JMdict_e");
    let output = dir.path().join("output.json");
    fs::write(&input, FIXTURE).unwrap();

    let summary = convert_file(
        &input,
        &output,
        ConvertConfig::new().with_indent(2).with_validation(true),
    )
    .unwrap();
    assert_eq!(summary.entries, 2);

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    let first = &entries[0];
    assert_eq!(first["ent_seq"], "1000");
    assert_eq!(first["k_ele"][0]["keb"], "書く");
    assert_eq!(first["k_ele"][0]["ke_pri"][0], "ichi1");
    assert_eq!(first["sense"][0]["pos"][0], "v5k");
    assert_eq!(first["sense"][0]["dial"][0], "ksb");
    assert_eq!(first["sense"][1]["stagk"][0], "書く");

    let second = &entries[1];
    assert!(second.get("k_ele").is_none());
    assert_eq!(second["r_ele"][0]["re_nokanji"], true);
    // Only the language-tagged source line is kept, as the language code
    assert_eq!(second["sense"][0]["lsource"][0], "por");
    assert_eq!(second["sense"][0]["lsource"].as_array().unwrap().len(), 1);
}

#[test]
fn test_sense_keys_follow_vocabulary_order_not_input_order() {
    let mut scanner = parse_entries(std::io::Cursor::new(FIXTURE));
    let entry = scanner.next().unwrap().unwrap();

    let json = render_entries(&[entry], 0);
    let pos_at = json.find("\"pos\"").unwrap();
    let dial_at = json.find("\"dial\"").unwrap();
    let gloss_at = json.find("\"gloss\"").unwrap();
    // Input order was gloss, pos, dial; output order is pos, dial, gloss
    assert!(pos_at < dial_at && dial_at < gloss_at);
}

#[test]
fn test_streaming_and_in_memory_modes_are_equivalent() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("JMdict_e");
    fs::write(&input, FIXTURE).unwrap();

    for indent in [0u8, 2, 4] {
        let memory_out = dir.path().join(format!("m{}.json", indent));
        let stream_out = dir.path().join(format!("s{}.json", indent));

        convert_file(&input, &memory_out, ConvertConfig::new().with_indent(indent)).unwrap();
        convert_file(
            &input,
            &stream_out,
            ConvertConfig::new()
                .with_indent(indent)
                .with_mode(OutputMode::LowMemory)
                .with_batch_size(1),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&memory_out).unwrap(),
            fs::read_to_string(&stream_out).unwrap(),
            "mode outputs diverged at indent {}",
            indent
        );
    }
}

#[test]
fn test_compact_end_to_end_contract() {
    let input = "\
<entry>
<ent_seq>1000</ent_seq>
<k_ele>
<keb>書く</keb>
</k_ele>
<r_ele>
<reb>かく</reb>
</r_ele>
<sense>
<pos>&v5k;</pos>
<gloss>to write</gloss>
</sense>
</entry>
";
    let entries: Vec<_> = parse_entries(std::io::Cursor::new(input))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        render_entries(&entries, 0),
        r#"[{"ent_seq":"1000","k_ele":[{"keb":"書く"}],"r_ele":[{"reb":"かく"}],"sense":[{"pos":["v5k"],"gloss":["to write"]}]}]"#
    );
}

#[test]
fn test_entity_table_survives_json_dump() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("JMdict_e");
    fs::write(&input, FIXTURE).unwrap();

    let table = scan_entities(&input).unwrap();
    assert_eq!(table.expansion("pos", "n"), Some("noun (common)"));
    assert_eq!(table.expansion("dial", "ksb"), Some("Kansai-ben"));

    let dumped = serde_json::to_string_pretty(&table).unwrap();
    let value: serde_json::Value = serde_json::from_str(&dumped).unwrap();
    let categories = value["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["code"], "pos");
    assert_eq!(categories[0]["entities"][1]["expansion"], "noun (common)");
}

#[test]
fn test_truncated_record_fails_loudly_in_both_modes() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("JMdict_e");
    fs::write(
        &input,
        "<entry>\n<ent_seq>1000</ent_seq>\n<r_ele>\n<reb>かく</reb>\n",
    )
    .unwrap();

    for mode in [OutputMode::InMemory, OutputMode::LowMemory] {
        let output = dir.path().join("out.json");
        let err = convert_file(&input, &output, ConvertConfig::new().with_mode(mode)).unwrap_err();
        let message = err.user_message();
        assert!(
            message.contains("r_ele"),
            "error should name the open block: {}",
            message
        );
    }
}

#[test]
fn test_quiet_progress_sink_works_end_to_end() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("JMdict_e");
    let output = dir.path().join("output.json");
    fs::write(&input, FIXTURE).unwrap();

    let converter = jmdict2json::Converter::new(ConvertConfig::default());
    let summary = converter.run(&input, &output, &NullProgress).unwrap();
    assert_eq!(summary.duplicates, 0);
    assert!(summary.output_bytes > 0);
}
