use notecheck_canonical::{sha256_hex, Event, Tag, UnsignedEvent};
use notecheck_core::{
    delegation::delegation_message,
    signing::{public_key_hex, sign_delegation, sign_event},
    ConstraintViolation, DelegationToken, Limits, Rejection, Verifier,
};

const ALICE: &str = "0101010101010101010101010101010101010101010101010101010101010101";
const BOB: &str = "0202020202020202020202020202020202020202020202020202020202020202";

fn make_template() -> UnsignedEvent {
    UnsignedEvent {
        pubkey: String::new(),
        created_at: 1_700_000_000,
        kind: 1,
        tags: vec![Tag::new(["t", "nostr"])],
        content: "hello".into(),
    }
}

fn make_event() -> Event {
    sign_event(ALICE, &make_template()).unwrap()
}

#[test]
fn test_valid_event_accepted() {
    let verifier = Verifier::new();
    let event = make_event();
    let acceptance = verifier.validate(&event).unwrap();
    assert_eq!(acceptance.id, event.id);
    assert_eq!(acceptance.effective_author(), public_key_hex(ALICE).unwrap());
    assert!(acceptance.delegator.is_none());
}

#[test]
fn test_valid_event_passes_default_limits() {
    let verifier = Verifier::new();
    assert!(verifier
        .validate_with_limits(&make_event(), &Limits::default())
        .is_ok());
}

#[test]
fn test_mutated_fields_cause_identity_mismatch() {
    let verifier = Verifier::new();
    let base = make_event();

    let mut mutants = Vec::new();
    let mut e = base.clone();
    e.content = "hellO".into();
    mutants.push(e);
    let mut e = base.clone();
    e.created_at -= 1;
    mutants.push(e);
    let mut e = base.clone();
    e.kind = 2;
    mutants.push(e);
    let mut e = base.clone();
    e.tags.push(Tag::new(["p", "x"]));
    mutants.push(e);
    let mut e = base.clone();
    e.tags[0].0[1] = "nostR".into();
    mutants.push(e);

    for m in mutants {
        assert!(!verifier.verify_identity(&m));
        assert_eq!(verifier.validate(&m), Err(Rejection::IdentityMismatch));
    }
}

#[test]
fn test_signature_from_other_key_rejected() {
    let verifier = Verifier::new();
    let event = make_event();
    let forged = sign_event(BOB, &make_template()).unwrap();

    // Alice's id and pubkey with Bob's signature.
    let mut e = event.clone();
    e.sig = forged.sig.clone();
    assert_eq!(verifier.validate(&e), Err(Rejection::SignatureInvalid));
}

#[test]
fn test_claiming_other_pubkey_rejected() {
    let verifier = Verifier::new();
    let mut template = make_template();
    template.pubkey = public_key_hex(BOB).unwrap();
    let by_alice = sign_event(ALICE, &make_template()).unwrap();

    // Recompute the id for Bob's pubkey but keep Alice's signature.
    let bob_id = notecheck_canonical::compute_event_id(&template.commitment())
        .unwrap()
        .to_hex();
    let e = Event {
        id: bob_id,
        pubkey: template.pubkey.clone(),
        sig: by_alice.sig.clone(),
        ..by_alice
    };
    assert_eq!(verifier.validate(&e), Err(Rejection::SignatureInvalid));
}

#[test]
fn test_malformed_hex_never_panics() {
    let verifier = Verifier::new();
    let base = make_event();

    let mut e = base.clone();
    e.sig = "not hex at all".into();
    assert_eq!(verifier.validate(&e), Err(Rejection::SignatureInvalid));

    let mut e = base.clone();
    e.sig = base.sig[..64].to_string();
    assert_eq!(verifier.validate(&e), Err(Rejection::SignatureInvalid));

    let mut e = base.clone();
    e.id = "zz".repeat(32);
    assert_eq!(verifier.validate(&e), Err(Rejection::IdentityMismatch));

    let mut e = base.clone();
    e.pubkey = "qq".repeat(32);
    assert_eq!(verifier.validate(&e), Err(Rejection::IdentityMismatch));
    assert!(!verifier.verify_signature(&base.sig, &base.id, "qq"));
}

#[test]
fn test_shape_failure_comes_first() {
    let verifier = Verifier::new();
    let mut e = make_event();
    e.id = e.id.to_uppercase();
    assert!(matches!(
        verifier.validate_with_limits(&e, &Limits::default()),
        Err(Rejection::Malformed(_))
    ));
    assert_eq!(verifier.validate(&e), Err(Rejection::IdentityMismatch));
}

#[test]
fn test_uppercase_delegation_token_is_malformed() {
    let verifier = Verifier::new();
    let delegatee = public_key_hex(BOB).unwrap();
    let mut token = sign_delegation(ALICE, &delegatee, "kind=1").unwrap();
    token.delegator = token.delegator.to_uppercase();
    token.sig = token.sig.to_uppercase();
    let template = UnsignedEvent {
        pubkey: String::new(),
        created_at: 10,
        kind: 1,
        tags: vec![token.to_tag()],
        content: String::new(),
    };
    let e = sign_event(BOB, &template).unwrap();

    assert!(matches!(
        verifier.validate_with_limits(&e, &Limits::default()),
        Err(Rejection::Malformed(_))
    ));
}

#[test]
fn test_delegated_event_passes_default_limits() {
    let verifier = Verifier::new();
    let e = delegated_event("kind=1", 1, 10);
    let acceptance = verifier.validate_with_limits(&e, &Limits::default()).unwrap();
    assert_eq!(acceptance.effective_author(), public_key_hex(ALICE).unwrap());
}

fn delegated_event(conditions: &str, kind: u64, created_at: u64) -> Event {
    let delegatee = public_key_hex(BOB).unwrap();
    let token = sign_delegation(ALICE, &delegatee, conditions).unwrap();
    let template = UnsignedEvent {
        pubkey: String::new(),
        created_at,
        kind,
        tags: vec![Tag::new(["t", "x"]), token.to_tag()],
        content: "on behalf of alice".into(),
    };
    sign_event(BOB, &template).unwrap()
}

#[test]
fn test_delegated_event_accepted_as_delegator() {
    let verifier = Verifier::new();
    let e = delegated_event("kind=1&created_at>100&created_at<2000000000", 1, 1_700_000_000);
    let acceptance = verifier.validate(&e).unwrap();
    assert_eq!(acceptance.signer, public_key_hex(BOB).unwrap());
    assert_eq!(acceptance.effective_author(), public_key_hex(ALICE).unwrap());
    assert_eq!(acceptance.constraints.unwrap().kinds, vec![1]);
}

#[test]
fn test_delegated_event_kind_violation() {
    let verifier = Verifier::new();
    let e = delegated_event("kind=1&kind=7", 3, 500);
    assert_eq!(
        verifier.validate(&e),
        Err(Rejection::DelegationConstraintViolation(
            ConstraintViolation::KindNotDelegated { kind: 3 }
        ))
    );
    assert_eq!(
        verifier.validate(&e).unwrap_err().to_string(),
        "not delegated for this kind"
    );
}

#[test]
fn test_delegated_event_future_violation() {
    let verifier = Verifier::new();
    let e = delegated_event("created_at<1000", 1, 1001);
    assert_eq!(
        verifier.validate(&e).unwrap_err().to_string(),
        "not delegated that far into the future"
    );
}

#[test]
fn test_delegated_event_past_violation() {
    let verifier = Verifier::new();
    let e = delegated_event("created_at>1000&kind=1", 1, 999);
    assert_eq!(
        verifier.validate(&e).unwrap_err().to_string(),
        "not delegated that far into the past"
    );
}

#[test]
fn test_unrestricted_kinds_accept_any_kind() {
    let verifier = Verifier::new();
    let e = delegated_event("created_at>1", 30023, 50);
    assert!(verifier.validate(&e).is_ok());
}

#[test]
fn test_delegation_signed_for_other_delegatee_rejected() {
    let verifier = Verifier::new();
    // Token issued to Alice herself, used by Bob.
    let token = sign_delegation(ALICE, &public_key_hex(ALICE).unwrap(), "kind=1").unwrap();
    let template = UnsignedEvent {
        pubkey: String::new(),
        created_at: 10,
        kind: 1,
        tags: vec![token.to_tag()],
        content: String::new(),
    };
    let e = sign_event(BOB, &template).unwrap();
    assert_eq!(verifier.validate(&e), Err(Rejection::DelegationSignatureInvalid));
}

#[test]
fn test_tampered_conditions_rejected() {
    let verifier = Verifier::new();
    let delegatee = public_key_hex(BOB).unwrap();
    let mut token = sign_delegation(ALICE, &delegatee, "kind=1").unwrap();
    token.conditions = "kind=1&kind=2".into();
    let e = sign_event(
        BOB,
        &UnsignedEvent {
            pubkey: String::new(),
            created_at: 10,
            kind: 2,
            tags: vec![],
            content: String::new(),
        },
    )
    .unwrap();
    assert_eq!(
        verifier.verify_delegation(&token, &e),
        Err(Rejection::DelegationSignatureInvalid)
    );
}

#[test]
fn test_bad_grammar_rejected_before_signature_check() {
    let verifier = Verifier::new();
    let delegatee = public_key_hex(BOB).unwrap();
    // A correctly signed token whose conditions use an unknown key.
    let token = sign_delegation(ALICE, &delegatee, "kind=1&relay=x").unwrap();
    let e = delegated_event("kind=1", 1, 10);
    let err = verifier.verify_delegation(&token, &e).unwrap_err();
    assert!(matches!(err, Rejection::DelegationGrammarInvalid(_)));
    assert_eq!(err.to_string(), "invalid delegation token");

    // Garbage signature: still a grammar rejection, the signature is never looked at.
    let mut garbage = token.clone();
    garbage.sig = "nothex".into();
    assert!(matches!(
        verifier.verify_delegation(&garbage, &e),
        Err(Rejection::DelegationGrammarInvalid(_))
    ));
}

#[test]
fn test_malformed_delegation_tag_rejected() {
    let verifier = Verifier::new();
    let template = UnsignedEvent {
        pubkey: String::new(),
        created_at: 10,
        kind: 1,
        tags: vec![Tag::new(["delegation", "abc"])],
        content: String::new(),
    };
    let e = sign_event(BOB, &template).unwrap();
    assert!(matches!(
        verifier.validate(&e),
        Err(Rejection::DelegationGrammarInvalid(_))
    ));
}

#[test]
fn test_identity_checked_before_delegation() {
    let verifier = Verifier::new();
    let mut e = delegated_event("kind=5", 1, 10);
    e.content.push('x');
    assert_eq!(verifier.validate(&e), Err(Rejection::IdentityMismatch));
}

// BIP-340 test vector 1.
#[test]
fn test_bip340_vector_verifies() {
    let verifier = Verifier::new();
    let pubkey = "dff1d77f2a671c5f36183726db2341be58feae1da2deced843240f7b502ba659";
    let message = "243f6a8885a308d313198a2e03707344a4093822299f31d0082efa98ec4e6c89";
    let sig = "6896bd60eeae296db48a229ff71dfe071bde413e6d43f917dc8dcf8c78de3341\
               8906d11ac976abccb20b091292bff4ea897efcb639ea871cfa95f6de339e4b0a";
    assert!(verifier.verify_signature(sig, message, pubkey));

    let mut flipped = message.to_string();
    flipped.replace_range(63.., "8");
    assert!(!verifier.verify_signature(sig, &flipped, pubkey));
}

const NIP26_DELEGATOR_SECRET: &str =
    "ee35e8bb71131c02c1d7e73231daa48e9953d329a4b701f7133c8f46dd21139c";
const NIP26_DELEGATOR: &str = "8e0d3d3eb2881ec137a11debe736a9086715a8c8beeeda615780064d68bc25dd";
const NIP26_DELEGATEE: &str = "477318cfb5427b9cfc66a9fa376150c1ddbc62115ae27cef72417eb959691396";
const NIP26_CONDITIONS: &str = "kind=1&created_at>1674834236&created_at<1677426236";
const NIP26_SIG: &str = "6f44d7fe4f1c09f3954640fb58bd12bae8bb8ff4120853c4693106c82e920e2b\
                         898f1f9ba9bd65449a987c39c0423426ab7b53910c0c6abfb41b30bc16e5f524";

fn nip26_token() -> DelegationToken {
    DelegationToken {
        delegator: NIP26_DELEGATOR.into(),
        conditions: NIP26_CONDITIONS.into(),
        sig: NIP26_SIG.into(),
    }
}

fn nip26_event(created_at: u64) -> Event {
    Event {
        id: String::new(),
        pubkey: NIP26_DELEGATEE.into(),
        created_at,
        kind: 1,
        tags: vec![nip26_token().to_tag()],
        content: "Hello, world!".into(),
        sig: String::new(),
    }
}

#[test]
fn test_nip26_delegator_key_derivation() {
    assert_eq!(public_key_hex(NIP26_DELEGATOR_SECRET).unwrap(), NIP26_DELEGATOR);
}

#[test]
fn test_nip26_token_verifies() {
    let verifier = Verifier::new();
    let constraints = verifier
        .verify_delegation(&nip26_token(), &nip26_event(1_676_000_000))
        .unwrap();
    assert_eq!(constraints.kinds, vec![1]);
    assert_eq!(constraints.from, Some(1_674_834_236));
    assert_eq!(constraints.to, Some(1_677_426_236));
}

#[test]
fn test_nip26_message_names_the_delegatee() {
    let verifier = Verifier::new();
    let signed = sha256_hex(delegation_message(NIP26_DELEGATEE, NIP26_CONDITIONS));
    assert_eq!(
        delegation_message(NIP26_DELEGATEE, NIP26_CONDITIONS),
        format!("nostr:delegation:{NIP26_DELEGATEE}:{NIP26_CONDITIONS}")
    );
    assert!(verifier.verify_signature(NIP26_SIG, &signed, NIP26_DELEGATOR));

    let with_delegator = sha256_hex(delegation_message(NIP26_DELEGATOR, NIP26_CONDITIONS));
    assert!(!verifier.verify_signature(NIP26_SIG, &with_delegator, NIP26_DELEGATOR));
}

#[test]
fn test_nip26_token_rejects_other_delegatee() {
    let verifier = Verifier::new();
    let mut e = nip26_event(1_676_000_000);
    e.pubkey = public_key_hex(BOB).unwrap();
    assert_eq!(
        verifier.verify_delegation(&nip26_token(), &e),
        Err(Rejection::DelegationSignatureInvalid)
    );
}

// The published example event is dated after the token's `to` bound.
#[test]
fn test_nip26_example_event_is_past_its_window() {
    let verifier = Verifier::new();
    let e = Event {
        id: "e93c6095c3db1c31d15ac771f8fc5fb672f6e52cd25505099f62cd055523224f".into(),
        sig: "633db60e2e7082c13a47a6b19d663d45b2a2ebdeaf0b4c35ef83be2738030c54\
              fc7fd56d139652937cdca875ee61b51904a1d0d0588a6acd6168d7be2909d693"
            .into(),
        ..nip26_event(1_677_426_298)
    };
    assert!(verifier.verify_identity(&e));
    assert_eq!(verifier.verify_event(&e), Ok(()));
    assert_eq!(
        verifier.validate_with_limits(&e, &Limits::default()),
        Err(Rejection::DelegationConstraintViolation(
            ConstraintViolation::TooFarInFuture {
                created_at: 1_677_426_298,
                to: 1_677_426_236,
            }
        ))
    );
}
