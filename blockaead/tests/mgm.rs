use aes::Aes128;
use blockaead::{
    Aead, Error, Mgm,
    blockmac::cipher::KeyInit,
};
use hex_literal::hex;
use kuznyechik::Kuznyechik;

//
// Test vector from RFC 9058 Appendix A
// <https://www.rfc-editor.org/rfc/rfc9058#appendix-A>
//

const KEY: [u8; 32] = hex!(
    "8899aabbccddeeff0011223344556677"
    "fedcba98765432100123456789abcdef"
);
const NONCE: [u8; 16] = hex!("1122334455667700ffeeddccbbaa9988");
const AD: [u8; 41] = hex!(
    "02020202020202020101010101010101"
    "04040404040404040303030303030303"
    "ea0505050505050505"
);
const PLAINTEXT: [u8; 67] = hex!(
    "1122334455667700ffeeddccbbaa9988"
    "00112233445566778899aabbcceeff0a"
    "112233445566778899aabbcceeff0a00"
    "2233445566778899aabbcceeff0a0011"
    "aabbcc"
);
const CIPHERTEXT: [u8; 67] = hex!(
    "a9757b8147956e9055b8a33de89f42fc"
    "8075d2212bf9fd5bd3f7069aadc16b39"
    "497ab15915a6ba85936b5d0ea9f6851c"
    "c60c14d4d3f883d0ab94420695c76deb"
    "2c7552"
);
const TAG: [u8; 16] = hex!("cf5d656f40c34f5c46e8bb0e29fcdb4c");

fn kuznyechik_mgm() -> Mgm<Kuznyechik> {
    Mgm::new(Kuznyechik::new(&KEY.into())).unwrap()
}

fn rfc9058_output() -> Vec<u8> {
    [&CIPHERTEXT[..], &TAG[..]].concat()
}

#[test]
fn rfc9058_seal() {
    let mgm = kuznyechik_mgm();
    assert_eq!(mgm.nonce_size(), 16);
    assert_eq!(mgm.overhead(), 16);
    assert_eq!(mgm.seal(&NONCE, &PLAINTEXT, &AD).unwrap(), rfc9058_output());
}

#[test]
fn rfc9058_open() {
    let mgm = kuznyechik_mgm();
    assert_eq!(
        mgm.open(&NONCE, &rfc9058_output(), &AD).unwrap(),
        PLAINTEXT
    );
}

#[test]
fn truncated_tag_is_prefix() {
    for tag_size in [1, 4, 8, 12, 16] {
        let mgm = Mgm::with_tag_size(Kuznyechik::new(&KEY.into()), tag_size).unwrap();
        assert_eq!(mgm.overhead(), tag_size);
        assert_eq!(mgm.tag_size(), tag_size);

        let sealed = mgm.seal(&NONCE, &PLAINTEXT, &AD).unwrap();
        assert_eq!(sealed[..67], CIPHERTEXT);
        assert_eq!(sealed[67..], TAG[..tag_size], "tag size {tag_size}");
        assert_eq!(mgm.open(&NONCE, &sealed, &AD).unwrap(), PLAINTEXT);
    }
}

#[test]
fn aes_vector() {
    let key = hex!("000102030405060708090a0b0c0d0e0f");
    let nonce = hex!("01111111111111111111111111111111");
    let mgm = Mgm::new(Aes128::new(&key.into())).unwrap();

    let sealed = mgm.seal(&nonce, b"hello mgm world!!", b"header").unwrap();
    assert_eq!(
        sealed,
        hex!(
            "31155434f8f3f4f8c4c57bd7794fed32b1"
            "8183122090c9e6d0636a9e35f18fe938"
        )
    );
    assert_eq!(
        mgm.open(&nonce, &sealed, b"header").unwrap(),
        b"hello mgm world!!"
    );
}

#[test]
fn tampering_is_detected() {
    let mgm = kuznyechik_mgm();
    let sealed = rfc9058_output();

    for i in [0, 33, 66, 67, 82] {
        let mut tampered = sealed.clone();
        tampered[i] ^= 0x01;
        assert_eq!(mgm.open(&NONCE, &tampered, &AD), Err(Error::Authentication));
    }

    let mut ad = AD;
    ad[40] ^= 0x80;
    assert_eq!(mgm.open(&NONCE, &sealed, &ad), Err(Error::Authentication));

    let mut nonce = NONCE;
    nonce[15] ^= 0x01;
    assert_eq!(mgm.open(&nonce, &sealed, &AD), Err(Error::Authentication));

    assert_eq!(
        mgm.open(&NONCE, &sealed[..15], &AD),
        Err(Error::Authentication)
    );
}

#[test]
fn open_append_keeps_dst_on_failure() {
    let mgm = kuznyechik_mgm();
    let mut sealed = rfc9058_output();
    sealed[0] ^= 0xff;

    let mut dst = b"prefix".to_vec();
    assert_eq!(
        mgm.open_append(&mut dst, &NONCE, &sealed, &AD),
        Err(Error::Authentication)
    );
    assert_eq!(dst, b"prefix");

    sealed[0] ^= 0xff;
    mgm.open_append(&mut dst, &NONCE, &sealed, &AD).unwrap();
    assert_eq!(dst[..6], *b"prefix");
    assert_eq!(dst[6..], PLAINTEXT);
}

#[test]
fn seal_append_extends_dst() {
    let mgm = kuznyechik_mgm();
    let mut dst = vec![0xaa; 3];
    mgm.seal_append(&mut dst, &NONCE, &PLAINTEXT, &AD).unwrap();
    assert_eq!(dst[..3], [0xaa; 3]);
    assert_eq!(dst[3..], rfc9058_output()[..]);
}

#[test]
fn associated_data_only() {
    let mgm = kuznyechik_mgm();
    let sealed = mgm.seal(&NONCE, b"", &AD).unwrap();
    assert_eq!(sealed.len(), 16);
    assert_eq!(mgm.open(&NONCE, &sealed, &AD).unwrap(), b"");
    assert_eq!(mgm.open(&NONCE, &sealed, b"other"), Err(Error::Authentication));

    // A bare tag with no associated data has nothing to authenticate.
    assert_eq!(mgm.open(&NONCE, &sealed, b""), Err(Error::EmptyInput));
}

#[test]
fn precondition_errors() {
    let mgm = kuznyechik_mgm();

    assert_eq!(mgm.seal(&NONCE, b"", b""), Err(Error::EmptyInput));
    assert_eq!(mgm.open(&NONCE, &TAG, b""), Err(Error::EmptyInput));

    assert_eq!(
        mgm.seal(&NONCE[..12], &PLAINTEXT, &AD),
        Err(Error::InvalidNonceSize {
            expected: 16,
            actual: 12
        })
    );

    let mut nonce = NONCE;
    nonce[0] |= 0x80;
    assert_eq!(mgm.seal(&nonce, &PLAINTEXT, &AD), Err(Error::InvalidNonce));
    assert_eq!(
        mgm.open(&nonce, &rfc9058_output(), &AD),
        Err(Error::InvalidNonce)
    );
}

#[test]
fn construction_errors() {
    assert_eq!(
        Mgm::with_tag_size(Kuznyechik::new(&KEY.into()), 0).unwrap_err(),
        Error::InvalidTagSize {
            tag_size: 0,
            max: 16
        }
    );
    assert_eq!(
        Mgm::with_tag_size(Kuznyechik::new(&KEY.into()), 17).unwrap_err(),
        Error::InvalidTagSize {
            tag_size: 17,
            max: 16
        }
    );
}
