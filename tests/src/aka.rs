//! AKA exchange integration tests
//!
//! The home network builds an authentication vector, the subscriber checks
//! AUTN, and on a sequence number failure the subscriber answers with AUTS.

use integration_tests::test_fixtures::TEST_SETS;
use integration_tests::{assert_hex_eq, decode_hex, init_test_logging, TestResult, TestSubscriber};
use milenage_crypto::{MilenageError, Output, AUTN_SIZE, AUTS_SIZE, RESYNC_AMF};

#[test]
fn test_network_and_subscriber_agree() -> TestResult {
    init_test_logging();

    let subscriber = TestSubscriber::default();
    let network = subscriber.context();
    let ue = subscriber.context();
    let rand = decode_hex(TEST_SETS[0].rand);
    let amf = subscriber.config.amf;

    // Home network side
    let autn = network.generate_autn(&rand, &subscriber.sqn, &amf)?;
    let xres = network.f2_f5(&rand)?;
    assert_eq!(autn.len(), AUTN_SIZE);

    // Subscriber side
    let sqn = ue.verify_autn(&rand, &autn)?;
    assert_eq!(sqn, subscriber.sqn);
    let res = ue.f2_f5(&rand)?;
    assert_eq!(res.get(Output::Res), xres.get(Output::Res));
    assert_eq!(ue.f3(&rand)?, network.f3(&rand)?);
    assert_eq!(ue.f4(&rand)?, network.f4(&rand)?);
    Ok(())
}

#[test]
fn test_autn_layout() -> TestResult {
    let v = TEST_SETS[0];
    let m = v.context();
    let autn = m.generate_autn(&decode_hex(v.rand), &decode_hex(v.sqn), &decode_hex(v.amf))?;

    assert_hex_eq(&autn[6..8], v.amf, "AMF");
    assert_hex_eq(&autn[8..], v.mac_a, "MAC-A");
    let concealed: Vec<u8> = decode_hex(v.sqn)
        .iter()
        .zip(decode_hex(v.ak))
        .map(|(s, a)| s ^ a)
        .collect();
    assert_eq!(&autn[..6], concealed.as_slice());
    Ok(())
}

#[test]
fn test_autn_from_other_subscriber_is_rejected() -> TestResult {
    let rand = decode_hex(TEST_SETS[0].rand);
    let network = TEST_SETS[1].context();
    let ue = TEST_SETS[0].context();

    let autn = network.generate_autn(&rand, &decode_hex(TEST_SETS[1].sqn), &decode_hex(TEST_SETS[1].amf))?;
    assert_eq!(ue.verify_autn(&rand, &autn), Err(MilenageError::MacMismatch));
    Ok(())
}

#[test]
fn test_every_mac_bit_is_checked() -> TestResult {
    let subscriber = TestSubscriber::default();
    let m = subscriber.context();
    let rand = decode_hex(TEST_SETS[0].rand);
    let autn = m.generate_autn(&rand, &subscriber.sqn, &subscriber.config.amf)?;

    for bit in 0..64 {
        let mut tampered = autn;
        tampered[8 + bit / 8] ^= 0x80 >> (bit % 8);
        assert_eq!(m.verify_autn(&rand, &tampered), Err(MilenageError::MacMismatch), "bit {bit}");
    }
    Ok(())
}

#[test]
fn test_resynchronisation_flow() -> TestResult {
    init_test_logging();

    // The subscriber is ahead of the network
    let subscriber = TestSubscriber::default().with_sqn([0x00, 0x00, 0x00, 0x00, 0x00, 0x20]);
    let ue_sqn = [0x00, 0x00, 0x00, 0x00, 0x04, 0x00];
    let network = subscriber.context();
    let ue = subscriber.context();
    let rand = decode_hex(TEST_SETS[0].rand);

    let autn = network.generate_autn(&rand, &subscriber.sqn, &subscriber.config.amf)?;
    let received = ue.verify_autn(&rand, &autn)?;
    assert!(received < ue_sqn);

    let auts = ue.generate_auts(&rand, &ue_sqn)?;
    assert_eq!(auts.len(), AUTS_SIZE);

    let recovered = network.resync_sqn(&rand, &auts)?;
    assert_eq!(recovered, ue_sqn);
    Ok(())
}

#[test]
fn test_auts_matches_published_outputs() -> TestResult {
    for v in TEST_SETS {
        let m = v.context();
        let rand = decode_hex(v.rand);
        let auts = m.generate_auts(&rand, &decode_hex(v.sqn))?;

        let ak_star = decode_hex(v.ak_resync);
        let concealed: Vec<u8> = decode_hex(v.sqn).iter().zip(&ak_star).map(|(s, a)| s ^ a).collect();
        assert_eq!(&auts[..6], concealed.as_slice(), "{}", v.name);

        let mac_s = m.f1_f1_star(&rand, &decode_hex(v.sqn), &RESYNC_AMF)?;
        assert_eq!(mac_s.get(Output::MacS), Some(&auts[6..]), "{}", v.name);
    }
    Ok(())
}

#[test]
fn test_auts_wrong_length() {
    let m = TEST_SETS[0].context();
    let rand = decode_hex(TEST_SETS[0].rand);
    assert!(matches!(
        m.resync_sqn(&rand, &[0u8; 13]),
        Err(MilenageError::InvalidLength { field: "AUTS", .. })
    ));
}
