use proptest::prelude::*;

use rawtx_primitives::base58;
use rawtx_primitives::chainhash::Hash;
use rawtx_primitives::util::{reverse_bytes, TxReader, TxWriter, VarInt};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn varint_length_matches_encoding(value in any::<u64>()) {
        let vi = VarInt(value);
        let bytes = vi.to_bytes();
        prop_assert_eq!(bytes.len(), vi.length());
        let (decoded, used) = VarInt::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded.value(), value);
        prop_assert_eq!(used, bytes.len());
    }

    #[test]
    fn var_bytes_read_back(data in prop::collection::vec(any::<u8>(), 0..600)) {
        let mut writer = TxWriter::new();
        writer.write_var_bytes(&data);
        let bytes = writer.into_bytes();

        let mut reader = TxReader::new(&bytes);
        let len = reader.read_varint().unwrap().value() as usize;
        prop_assert_eq!(reader.read_bytes(len).unwrap(), &data[..]);
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn hash_display_is_reversed_internal(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = Hash::new(bytes);
        prop_assert_eq!(hash.to_string(), hex::encode(reverse_bytes(&bytes)));
        let parsed: Hash = hash.to_string().parse().unwrap();
        prop_assert_eq!(parsed, hash);
    }

    #[test]
    fn base58check_roundtrip(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = base58::check_encode(&data);
        prop_assert_eq!(base58::check_decode(&encoded).unwrap(), data);
    }
}
