use pmasm::{EncodeError, Encoder, EncoderConfig, Mode, RevisionId};

fn enc(revision: RevisionId) -> Encoder {
    Encoder::new(EncoderConfig { revision, mode: Mode::Lenient })
}

fn word(revision: RevisionId, line: &str) -> u32 {
    enc(revision).encode_line(line).unwrap().word
}

#[test]
fn opcode_tables_differ() {
    assert_eq!(word(RevisionId::V1, "n,0,a,mov") >> 24, 3);
    assert_eq!(word(RevisionId::V2, "n,0,a,mov") >> 24, 1);
    assert_eq!(word(RevisionId::V1, "n,0,a,cmp") >> 24, 0);
    assert_eq!(word(RevisionId::V2, "n,0,a,cmp") >> 24, 5);
}

#[test]
fn early_revision_alu_tail() {
    // signed | set-flags | gt(9), condition read from token 10
    assert_eq!(word(RevisionId::V1, "i,1,a,add,r1,r2,r3,s,sf,x,gt"), 0xC412_3C09);
    // token 8 is not a condition in this revision
    assert_eq!(word(RevisionId::V1, "i,1,a,add,r1,r2,r3,s,eq"), 0xC412_3800);
}

#[test]
fn early_revision_offset_tail() {
    assert_eq!(word(RevisionId::V1, "n,1,m,lw,r1,r2,r3,16,x,eq"), 0x6112_3104);
}

#[test]
fn early_revision_control_takes_an_offset() {
    let err = enc(RevisionId::V1).encode_line("n,0,c,jmp,r0,r0,r0,s").unwrap_err();
    assert!(matches!(err, EncodeError::Parse { what: "memory offset", .. }));
    assert_eq!(word(RevisionId::V2, "n,0,c,jmp,r0,r0,r0,s,ne,p"), 0x1100_080D);
}

#[test]
fn refined_conditions() {
    let cond = |c: &str| word(RevisionId::V2, &format!("n,0,a,cmp,r1,r2,r0,u,{c}")) & 0xF;
    assert_eq!(cond("eq"), 4);
    assert_eq!(cond("ne"), 12);
    assert_eq!(cond("lt"), 2);
    assert_eq!(cond("le"), 6);
    assert_eq!(cond("gt"), 10);
    assert_eq!(cond("ge"), 0);
}

#[test]
fn early_conditions() {
    let cond = |c: &str| word(RevisionId::V1, &format!("n,0,m,lw,r1,r2,r0,0,x,{c}")) & 0xF;
    assert_eq!(cond("z"), 4);
    assert_eq!(cond("ne"), 12);
    assert_eq!(cond("lt"), 2);
    assert_eq!(cond("gt"), 9);
    assert_eq!(cond("ge"), 10);
    assert_eq!(cond("le"), 1);
}

#[test]
fn predicate_only_in_refined() {
    assert_eq!(word(RevisionId::V2, "n,0,a,nop,r0,r0,r0,u,eq,p") & 1, 1);
    assert_eq!(word(RevisionId::V2, "n,0,a,nop,r0,r0,r0,u,eq,q") & 1, 0);
}

#[test]
fn stripped_revision_stops_after_opcode() {
    assert_eq!(word(RevisionId::V3, "i,1,c,hlt,r1,r2,r3,s,eq"), 0xD200_0000);
    // register tokens are never parsed
    assert_eq!(word(RevisionId::V3, "i,1,c,hlt,bogus"), 0xD200_0000);
}

#[test]
fn revision_tables_serialize() {
    let json = serde_json::to_value(enc(RevisionId::V2).revision()).unwrap();
    assert_eq!(json["id"], "v2");
    assert_eq!(json["layout"]["opcode"]["shift"], 24);
    assert_eq!(json["layout"]["registers"], serde_json::Value::Array(vec![
        serde_json::json!({ "shift": 20, "width": 4 }),
        serde_json::json!({ "shift": 16, "width": 4 }),
        serde_json::json!({ "shift": 12, "width": 4 }),
    ]));
    let v3 = serde_json::to_value(enc(RevisionId::V3).revision()).unwrap();
    assert!(v3["layout"]["registers"].is_null());
}

#[test]
fn unknown_class_takes_the_offset_tail() {
    let out = enc(RevisionId::V1).encode_line("n,0,x,add,r1,r2,r3,5").unwrap();
    assert_eq!(out.word, 0x0412_3050);
    assert_eq!(out.warnings, vec![pmasm::Warning::UnknownClass("x".into())]);
    // condition comes from the offset-class position
    assert_eq!(word(RevisionId::V1, "n,0,A,add,r1,r2,r3,5,x,eq"), 0x0412_3054);
    assert_eq!(word(RevisionId::V2, "n,0,x,add,r1,r2,r3,5,eq,p"), 0x0212_3055);
    // token 7 is read as an offset, so a signed marker does not parse
    assert!(matches!(
        enc(RevisionId::V2).encode_line("n,0,x,add,r1,r2,r3,s"),
        Err(EncodeError::Parse { what: "memory offset", .. })
    ));
}
