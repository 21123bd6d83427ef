//! Two-directional round-trip oracle.
//!
//! For a compiled candidate the codec must satisfy:
//!
//! - decode then encode: if `decode(b)` yields `v`, `encode(v)` succeeds and equals `b`
//! - encode then decode: if `encode(v)` yields `b`, `decode(b)` succeeds and equals `v`
//!
//! A failing first half is inconclusive (`Ok(false)`). A failing second
//! half after a successful first half is a [`DiscoveredDefect`].

use crate::codec::AbiCodec;
use crate::value::{describe_values, AbiValue};

use super::report::DiscoveredDefect;

/// Round-trip checks for one compiled candidate signature.
pub struct RoundTripOracle<'a, C: AbiCodec> {
    codec: &'a C,
    descriptor: &'a C::Descriptor,
    function: &'a str,
    signature: &'a str,
}

impl<'a, C: AbiCodec> RoundTripOracle<'a, C> {
    /// `signature` is the rendered interface description, quoted in defects.
    pub fn new(
        codec: &'a C,
        descriptor: &'a C::Descriptor,
        function: &'a str,
        signature: &'a str,
    ) -> Self {
        Self {
            codec,
            descriptor,
            function,
            signature,
        }
    }

    /// Decode `input`, re-encode the result, and require the original bytes back.
    pub fn decode_then_encode(&self, input: &[u8]) -> Result<bool, DiscoveredDefect> {
        let Ok(values) = self.codec.decode(self.descriptor, self.function, input) else {
            return Ok(false);
        };

        let output = self
            .codec
            .encode(self.descriptor, self.function, &values)
            .map_err(|e| DiscoveredDefect::ReencodeFailed {
                signature: self.signature.to_string(),
                input: hex::encode(input),
                error: e.to_string(),
            })?;

        if output != input {
            return Err(DiscoveredDefect::ReencodeMismatch {
                signature: self.signature.to_string(),
                input: hex::encode(input),
                output: hex::encode(&output),
            });
        }
        Ok(true)
    }

    /// Encode `values`, decode the result into a fresh set, and require equality.
    pub fn encode_then_decode(&self, values: &[AbiValue]) -> Result<bool, DiscoveredDefect> {
        let Ok(encoded) = self.codec.encode(self.descriptor, self.function, values) else {
            return Ok(false);
        };

        let decoded = self
            .codec
            .decode(self.descriptor, self.function, &encoded)
            .map_err(|e| DiscoveredDefect::RedecodeFailed {
                signature: self.signature.to_string(),
                values: describe_values(values),
                encoded: hex::encode(&encoded),
                error: e.to_string(),
            })?;

        if decoded != values {
            return Err(DiscoveredDefect::RedecodeMismatch {
                signature: self.signature.to_string(),
                input: describe_values(values),
                output: describe_values(&decoded),
                encoded: hex::encode(&encoded),
            });
        }
        Ok(true)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::codec::{CodecError, EthAbiCodec};
    use crate::value::AbiType;
    use ethabi::ethereum_types::U256;

    /// A deliberately broken codec over a single `uint8` argument.
    ///
    /// Decodes any 32-byte word to its last byte and encodes a value as a
    /// 32-byte word. The `Fault` selects where it misbehaves.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Fault {
        None,
        /// Encode drops the final byte.
        TruncatingEncode,
        /// Encode fails for every value.
        RefusingEncode,
        /// Decode fails for everything except a literal `[0; 32]`.
        RefusingDecode,
        /// Decode adds one to the value.
        SkewedDecode,
    }

    pub(crate) struct ScriptedCodec {
        pub(crate) fault: Fault,
    }

    impl ScriptedCodec {
        pub(crate) fn new(fault: Fault) -> Self {
            Self { fault }
        }
    }

    impl AbiCodec for ScriptedCodec {
        type Descriptor = Vec<AbiType>;

        fn parse(&self, text: &str) -> Result<Vec<AbiType>, CodecError> {
            if text.contains("\"stateMutability\":\"\"") {
                return Err(CodecError::Parse("empty stateMutability".into()));
            }
            Ok(vec![AbiType::Uint(8)])
        }

        fn argument_types<'d>(
            &self,
            descriptor: &'d Vec<AbiType>,
            _: &str,
        ) -> Result<&'d [AbiType], CodecError> {
            Ok(descriptor.as_slice())
        }

        fn decode(
            &self,
            _: &Vec<AbiType>,
            _: &str,
            data: &[u8],
        ) -> Result<Vec<AbiValue>, CodecError> {
            if data.len() != 32 {
                return Err(CodecError::Decode("need one word".into()));
            }
            if self.fault == Fault::RefusingDecode && data != [0u8; 32].as_slice() {
                return Err(CodecError::Decode("refused".into()));
            }
            let mut value = u64::from(data[31]);
            if self.fault == Fault::SkewedDecode {
                value += 1;
            }
            Ok(vec![AbiValue::Uint {
                bits: 8,
                value: U256::from(value),
            }])
        }

        fn encode(
            &self,
            _: &Vec<AbiType>,
            _: &str,
            values: &[AbiValue],
        ) -> Result<Vec<u8>, CodecError> {
            if self.fault == Fault::RefusingEncode {
                return Err(CodecError::Encode("refused".into()));
            }
            let [AbiValue::Uint { value, .. }] = values else {
                return Err(CodecError::Encode("need one uint".into()));
            };
            let mut word = [0u8; 32];
            value.to_big_endian(&mut word);
            let mut out = word.to_vec();
            if self.fault == Fault::TruncatingEncode {
                out.pop();
            }
            Ok(out)
        }
    }

    fn uint8(v: u64) -> AbiValue {
        AbiValue::Uint {
            bits: 8,
            value: U256::from(v),
        }
    }

    fn word(last: u8) -> Vec<u8> {
        let mut w = vec![0u8; 32];
        w[31] = last;
        w
    }

    #[test]
    fn test_faithful_codec_is_good_both_ways() {
        let codec = ScriptedCodec::new(Fault::None);
        let descriptor = vec![AbiType::Uint(8)];
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", "sig");
        assert_eq!(oracle.decode_then_encode(&word(9)), Ok(true));
        assert_eq!(oracle.encode_then_decode(&[uint8(9)]), Ok(true));
    }

    #[test]
    fn test_decode_failure_is_inconclusive() {
        let codec = ScriptedCodec::new(Fault::None);
        let descriptor = vec![AbiType::Uint(8)];
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", "sig");
        assert_eq!(oracle.decode_then_encode(&[1, 2, 3]), Ok(false));
    }

    #[test]
    fn test_encode_failure_is_inconclusive() {
        let codec = ScriptedCodec::new(Fault::RefusingEncode);
        let descriptor = vec![AbiType::Uint(8)];
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", "sig");
        assert_eq!(oracle.encode_then_decode(&[uint8(1)]), Ok(false));
    }

    #[test]
    fn test_reencode_mismatch_is_defect() {
        let codec = ScriptedCodec::new(Fault::TruncatingEncode);
        let descriptor = vec![AbiType::Uint(8)];
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", "sig");
        match oracle.decode_then_encode(&word(5)) {
            Err(DiscoveredDefect::ReencodeMismatch {
                signature,
                input,
                output,
            }) => {
                assert_eq!(signature, "sig");
                assert_eq!(input, hex::encode(word(5)));
                assert_eq!(output, hex::encode(&word(5)[..31]));
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_reencode_failure_is_defect() {
        let codec = ScriptedCodec::new(Fault::RefusingEncode);
        let descriptor = vec![AbiType::Uint(8)];
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", "sig");
        assert!(matches!(
            oracle.decode_then_encode(&word(1)),
            Err(DiscoveredDefect::ReencodeFailed { .. })
        ));
    }

    #[test]
    fn test_redecode_failure_is_defect() {
        let codec = ScriptedCodec::new(Fault::RefusingDecode);
        let descriptor = vec![AbiType::Uint(8)];
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", "sig");
        match oracle.encode_then_decode(&[uint8(4)]) {
            Err(DiscoveredDefect::RedecodeFailed { values, encoded, .. }) => {
                assert_eq!(values, "uint8:4");
                assert_eq!(encoded, hex::encode(word(4)));
            }
            other => panic!("expected redecode failure, got {other:?}"),
        }
    }

    #[test]
    fn test_redecode_mismatch_is_defect() {
        let codec = ScriptedCodec::new(Fault::SkewedDecode);
        let descriptor = vec![AbiType::Uint(8)];
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", "sig");
        match oracle.encode_then_decode(&[uint8(4)]) {
            Err(DiscoveredDefect::RedecodeMismatch { input, output, .. }) => {
                assert_eq!(input, "uint8:4");
                assert_eq!(output, "uint8:5");
            }
            other => panic!("expected redecode mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_eth_codec_uint8_zero_word() {
        let codec = EthAbiCodec;
        let text = r#"[{"type":"function","name":"foo","inputs":[{"name":"a","type":"uint8"}],"outputs":[{"name":"a","type":"uint8"}]}]"#;
        let descriptor = codec.parse(text).expect("parse");
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", text);
        assert_eq!(oracle.decode_then_encode(&[0u8; 32]), Ok(true));
        assert_eq!(oracle.encode_then_decode(&[uint8(0)]), Ok(true));
    }

    #[test]
    fn test_eth_codec_short_bytes_payload() {
        let codec = EthAbiCodec;
        let text = r#"[{"type":"function","name":"foo","inputs":[{"name":"a","type":"bytes"}],"outputs":[{"name":"a","type":"bytes"}]}]"#;
        let descriptor = codec.parse(text).expect("parse");
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", text);
        assert_eq!(oracle.decode_then_encode(&[0xaa; 20]), Ok(false));
    }

    #[test]
    fn test_eth_codec_fixed_array_values() {
        let codec = EthAbiCodec;
        let text = r#"[{"type":"function","name":"foo","inputs":[{"name":"a","type":"uint8[3]"}],"outputs":[{"name":"a","type":"uint8[3]"}]}]"#;
        let descriptor = codec.parse(text).expect("parse");
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", text);
        let values = [AbiValue::FixedArray(vec![uint8(3), uint8(2), uint8(1)])];
        assert_eq!(oracle.encode_then_decode(&values), Ok(true));
    }

    fn single_argument(ty: &str) -> String {
        format!(
            r#"[{{"type":"function","name":"foo","inputs":[{{"name":"a","type":"{ty}"}}],"outputs":[{{"name":"a","type":"{ty}"}}]}}]"#
        )
    }

    #[test]
    fn test_eth_codec_trailing_word_after_uint8() {
        let codec = EthAbiCodec;
        let text = single_argument("uint8");
        let descriptor = codec.parse(&text).expect("parse");
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", &text);

        let mut input = [0u8; 64];
        input[63] = 7;
        assert!(ethabi::decode_whole(&[ethabi::ParamType::Uint(8)], &input).is_err());
        assert_eq!(oracle.decode_then_encode(&input), Ok(false));
    }

    #[test]
    fn test_eth_codec_noncanonical_bytes_offset() {
        let codec = EthAbiCodec;
        let text = single_argument("bytes");
        let descriptor = codec.parse(&text).expect("parse");
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", &text);

        // head points past an unused word: offset 0x40, length 3, payload 010203
        let mut input = vec![0u8; 128];
        input[31] = 0x40;
        input[95] = 3;
        input[96..99].copy_from_slice(&[1, 2, 3]);

        match oracle.decode_then_encode(&input) {
            Err(DiscoveredDefect::ReencodeMismatch { input: seen, output, .. }) => {
                assert_eq!(seen, hex::encode(&input));
                assert_eq!(output.len(), 2 * 96);
            }
            other => panic!("expected re-encode mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_eth_codec_zero_length_static_fixed_array() {
        let codec = EthAbiCodec;
        let text = single_argument("uint8[0]");
        let descriptor = codec.parse(&text).expect("parse");
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", &text);
        assert_eq!(oracle.decode_then_encode(&[]), Ok(true));
        assert_eq!(oracle.encode_then_decode(&[AbiValue::FixedArray(vec![])]), Ok(true));
    }

    #[test]
    fn test_eth_codec_zero_length_dynamic_fixed_array() {
        // `string[0]` packs to nothing but unpacks by reading an offset word
        let codec = EthAbiCodec;
        let text = single_argument("string[0]");
        let descriptor = codec.parse(&text).expect("parse");
        let oracle = RoundTripOracle::new(&codec, &descriptor, "foo", &text);
        match oracle.encode_then_decode(&[AbiValue::FixedArray(vec![])]) {
            Err(DiscoveredDefect::RedecodeFailed { encoded, .. }) => assert_eq!(encoded, ""),
            other => panic!("expected re-decode failure, got {other:?}"),
        }
    }
}
