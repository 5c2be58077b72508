#[cfg(test)]
mod tests {
    use crate::abi::bindings;
    use crate::action::{action_digest, action_struct_hash, sign_action};
    use crate::authorization::{
        authorization_to_hex, build_authorization, decode_authorization, encode_authorization,
        recover_authority,
    };
    use crate::envelope::{BaseTx, SignedEnvelope, UnsignedEnvelope};
    use crate::hash::{authorization_digest, domain_separator};
    use crate::rlp::RlpItem;
    use crate::signer::{address_of, parse_private_key, recover_signer};
    use crate::typed_data::{hash_struct, type_hash, TypedStruct, TypedValue};
    use crate::terms::executor_terms_digest;
    use account7702_types::{
        Action, AddressEncoding, DelegationAuthorization, Eip712Domain, ExecutorTerms,
        ACTION_TYPE, EXECUTOR_TERMS_TYPE,
    };
    use alloy_primitives::{address, b256, Address, Bytes, B256, U256};
    use alloy_rlp::RlpEncodable;
    use alloy_sol_types::{eip712_domain, SolStruct};
    use k256::ecdsa::SigningKey;

    // Hardhat account #0.
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    const IMPLEMENTATION: Address = address!("1111111111111111111111111111111111111111");
    const ACCOUNT: Address = address!("2222222222222222222222222222222222222222");

    const GOLDEN_AUTHORIZATION: &str = "0xf85a019411111111111111111111111111111111111111118001a0ae3ce0f5deec815c0978f060a4444485f277c3f47b1a465ce368e34e426f49eea03e9f8631a03543dba183dd8255fa32062b616acc76f5dd8a59987cd47cf8468c";

    fn key() -> SigningKey {
        parse_private_key(TEST_KEY).unwrap()
    }

    fn golden_action() -> Action {
        Action {
            target: address!("3333333333333333333333333333333333333333"),
            data: Bytes::from_static(&[0xa9, 0x05, 0x9c, 0xbb]),
            value: U256::from(1_000_000_000_000_000_000u64),
            nonce: U256::from(7),
            expiration: U256::ZERO,
            fee_token: address!("4444444444444444444444444444444444444444"),
            fee_value: U256::from(250),
            is_basis_points: true,
        }
    }

    fn golden_domain() -> Eip712Domain {
        Eip712Domain::account_system(U256::from(1), ACCOUNT)
    }

    fn golden_authorization() -> DelegationAuthorization {
        build_authorization(U256::from(1), IMPLEMENTATION, 0, &key()).unwrap()
    }

    #[test]
    fn test_authorization_golden() {
        let authorization = golden_authorization();
        assert_eq!(
            authorization_digest(U256::from(1), IMPLEMENTATION, 0),
            b256!("d35655e0048045ff05a91979004fc1afa8325086bbab53c2498ecfcfe431d99f")
        );
        assert_eq!(authorization.y_parity, 1);
        assert_eq!(
            B256::from(authorization.r.to_be_bytes::<32>()),
            b256!("ae3ce0f5deec815c0978f060a4444485f277c3f47b1a465ce368e34e426f49ee")
        );
        assert_eq!(
            B256::from(authorization.s.to_be_bytes::<32>()),
            b256!("3e9f8631a03543dba183dd8255fa32062b616acc76f5dd8a59987cd47cf8468c")
        );
        assert_eq!(authorization_to_hex(&authorization), GOLDEN_AUTHORIZATION);
        assert_eq!(recover_authority(&authorization).unwrap(), TEST_ADDRESS);
    }

    #[test]
    fn test_authorization_unsigned_tuple_rlp() {
        let tuple = RlpItem::list([U256::from(1).into(), IMPLEMENTATION.into(), 0u64.into()]);
        assert_eq!(
            hex::encode(tuple.to_vec()),
            "d70194111111111111111111111111111111111111111180"
        );
    }

    #[test]
    fn test_authorization_round_trip() {
        let decoded = decode_authorization(GOLDEN_AUTHORIZATION).unwrap();
        assert_eq!(decoded, golden_authorization());
        assert_eq!(authorization_to_hex(&decoded), GOLDEN_AUTHORIZATION);
    }

    #[derive(RlpEncodable)]
    struct OracleAuthorization {
        chain_id: U256,
        address: Address,
        nonce: u64,
        y_parity: u8,
        r: U256,
        s: U256,
    }

    impl From<&DelegationAuthorization> for OracleAuthorization {
        fn from(a: &DelegationAuthorization) -> Self {
            Self {
                chain_id: a.chain_id,
                address: a.address,
                nonce: a.nonce,
                y_parity: a.y_parity,
                r: a.r,
                s: a.s,
            }
        }
    }

    #[test]
    fn test_authorization_matches_alloy_rlp() {
        let key = key();
        let cases = [(U256::ZERO, 0u64), (U256::from(1), 127), (U256::MAX, u64::MAX)];
        for (chain_id, nonce) in cases {
            let authorization =
                build_authorization(chain_id, IMPLEMENTATION, nonce, &key).unwrap();
            let oracle = alloy_rlp::encode(OracleAuthorization::from(&authorization));
            assert_eq!(encode_authorization(&authorization), oracle);
        }
    }

    #[test]
    fn test_action_golden() {
        let action = golden_action();
        assert_eq!(
            type_hash(ACTION_TYPE),
            b256!("d7eaae449249f63f640494a455f22be59be8c8cde6f713b1b06d68d82100424b")
        );
        assert_eq!(
            action_struct_hash(&action).unwrap(),
            b256!("2756e568eb6d29308f719a644ffea47c5baceef7c11dc2072101408805ce34ed")
        );
        assert_eq!(
            action_digest(&action, &golden_domain()).unwrap(),
            b256!("6a0cd4d533cf95969d300dd3f4d16c246dd87a890971cf49c02a8852506224c5")
        );

        let signed = sign_action(&action, &golden_domain(), &key()).unwrap();
        assert_eq!(
            hex::encode(signed.signature_bytes()),
            "6f273cb6b8bba016b434edf809716ca4fb0a2a2534d11b074c89c7aa65131e3e00cbd160351bf9b66b9f30f22318c696c3c0222b152991f0d8181e3b6bb3e95e1b"
        );
    }

    #[test]
    fn test_action_matches_sol_types() {
        let action = golden_action();
        let sol_action = bindings::Action::from(&action);
        let sol_domain = eip712_domain! {
            name: "AccountSystem7702",
            version: "1",
            chain_id: 1,
            verifying_contract: ACCOUNT,
        };

        assert_eq!(bindings::Action::eip712_encode_type(), ACTION_TYPE);
        assert_eq!(sol_action.eip712_hash_struct(), action_struct_hash(&action).unwrap());
        assert_eq!(sol_domain.separator(), domain_separator(&golden_domain()));
        assert_eq!(
            sol_action.eip712_signing_hash(&sol_domain),
            action_digest(&action, &golden_domain()).unwrap()
        );
    }

    #[test]
    fn test_raw_address_encoding_changes_digest() {
        let action = golden_action();
        let raw = golden_domain().with_address_encoding(AddressEncoding::Raw);
        assert_eq!(
            domain_separator(&raw),
            b256!("9a405b19400e209fbc7fc3a56095f40885f5af876b4c5669a1f7906dfda3cb74")
        );
        assert_ne!(
            action_digest(&action, &raw).unwrap(),
            action_digest(&action, &golden_domain()).unwrap()
        );
    }

    #[test]
    fn test_signing_is_deterministic() {
        let action = golden_action();
        let first = sign_action(&action, &golden_domain(), &key()).unwrap();
        let second = sign_action(&action, &golden_domain(), &key()).unwrap();
        assert_eq!(first, second);
        assert_eq!(golden_authorization(), golden_authorization());
    }

    #[test]
    fn test_digest_domains_are_separated() {
        let authorization = authorization_digest(U256::from(1), IMPLEMENTATION, 0);
        let action = golden_action();
        let typed = action_digest(&action, &golden_domain()).unwrap();
        assert_ne!(authorization, typed);

        // Same key, different domains: neither signature verifies under the other digest.
        let signed = sign_action(&action, &golden_domain(), &key()).unwrap();
        assert_ne!(
            recover_signer(authorization.as_slice(), &signed.signature).unwrap(),
            TEST_ADDRESS
        );
    }

    const PERMUTED_ACTION_TYPE: &str = "Action(address target,bytes data,uint256 value,uint256 expiration,uint256 nonce,address feeToken,uint256 feeValue,bool isBasisPoints)";

    #[test]
    fn test_field_order_changes_struct_hash() {
        let action = golden_action();
        let mut values = action.values();
        values.swap(3, 4);
        let permuted = hash_struct(PERMUTED_ACTION_TYPE, &values).unwrap();
        assert_ne!(permuted, action_struct_hash(&action).unwrap());

        // Values out of declared order are caught when their kinds differ.
        let mut misordered = action.values();
        misordered.swap(0, 1);
        assert!(hash_struct(ACTION_TYPE, &misordered).is_err());
    }

    #[test]
    fn test_type_string_order_alone_changes_struct_hash() {
        let action = golden_action();
        let reordered = hash_struct(PERMUTED_ACTION_TYPE, &action.values()).unwrap();
        assert_ne!(reordered, action_struct_hash(&action).unwrap());

        // Equal nonce and expiration make the member words identical; only the type hash moves.
        let zeroed = Action {
            target: action.target,
            ..Default::default()
        };
        let reordered = hash_struct(PERMUTED_ACTION_TYPE, &zeroed.values()).unwrap();
        assert_ne!(reordered, action_struct_hash(&zeroed).unwrap());
    }

    mod sol_terms {
        alloy_sol_types::sol! {
            struct ExecutorTerms {
                address[] rewardTokens;
                uint16[] basisPoints;
            }
        }
    }

    #[test]
    fn test_executor_terms_match_sol_types() {
        let terms = ExecutorTerms {
            reward_tokens: vec![
                address!("4444444444444444444444444444444444444444"),
                address!("5555555555555555555555555555555555555555"),
            ],
            basis_points: vec![250, 10_000],
        };
        let sol_value = sol_terms::ExecutorTerms {
            rewardTokens: terms.reward_tokens.clone(),
            basisPoints: terms.basis_points.clone(),
        };
        let sol_domain = eip712_domain! {
            name: "DegenCasino",
            version: "1",
            chain_id: 1,
            verifying_contract: ACCOUNT,
        };
        let domain = Eip712Domain::executor_terms(U256::from(1), ACCOUNT);

        assert_eq!(sol_terms::ExecutorTerms::eip712_encode_type(), EXECUTOR_TERMS_TYPE);
        assert_eq!(sol_value.eip712_hash_struct(), terms.struct_hash().unwrap());
        assert_eq!(sol_domain.separator(), domain_separator(&domain));
        assert_eq!(
            sol_value.eip712_signing_hash(&sol_domain),
            executor_terms_digest(&terms, &domain).unwrap()
        );

        let empty = ExecutorTerms::default();
        let sol_empty = sol_terms::ExecutorTerms {
            rewardTokens: Vec::new(),
            basisPoints: Vec::new(),
        };
        assert_eq!(sol_empty.eip712_hash_struct(), empty.struct_hash().unwrap());
    }

    #[test]
    fn test_nonce_reuse_is_accepted() {
        let first = golden_action();
        let mut second = golden_action();
        second.data = Bytes::from_static(&[0x01]);
        assert_eq!(first.nonce, second.nonce);

        let domain = golden_domain();
        let a = sign_action(&first, &domain, &key()).unwrap();
        let b = sign_action(&second, &domain, &key()).unwrap();
        assert_ne!(a.signature, b.signature);
    }

    #[test]
    fn test_zero_payload_action_hashes_and_signs() {
        let action = Action {
            target: address!("3333333333333333333333333333333333333333"),
            ..Default::default()
        };
        assert_eq!(
            action_struct_hash(&action).unwrap(),
            b256!("4b9854eb9d7fe8fecac754e2c99166755dd84cc68e83704e980e638e841e82c8")
        );
        assert_eq!(action.values()[1], TypedValue::Bytes(&[]));

        let signed = sign_action(&action, &golden_domain(), &key()).unwrap();
        let digest = action_digest(&action, &golden_domain()).unwrap();
        assert_eq!(
            recover_signer(digest.as_slice(), &signed.signature).unwrap(),
            TEST_ADDRESS
        );
    }

    #[test]
    fn test_recovery_id_conventions() {
        let signed = sign_action(&golden_action(), &golden_domain(), &key()).unwrap();
        assert!(matches!(signed.signature.v, 27 | 28));
        assert!(golden_authorization().y_parity <= 1);

        for nonce in 0..8u64 {
            let authorization =
                build_authorization(U256::from(1), IMPLEMENTATION, nonce, &key()).unwrap();
            assert!(authorization.y_parity <= 1);
            let mut action = golden_action();
            action.nonce = U256::from(nonce);
            let v = sign_action(&action, &golden_domain(), &key()).unwrap().signature.v;
            assert!(v == 27 || v == 28);
        }
    }

    fn golden_base() -> BaseTx {
        BaseTx {
            chain_id: 1,
            nonce: 3,
            gas_price: 2_000_000_000,
            gas_limit: 5_000_000,
            to: ACCOUNT,
            value: U256::ZERO,
            data: Bytes::from_static(&[0xa9, 0x05, 0x9c, 0xbb]),
            access_list: Vec::new(),
        }
    }

    const GOLDEN_ENVELOPE: &str = "04f8cd010384773594008477359400834c4b409422222222222222222222222222222222222222228084a9059cbbc0f85cf85a019411111111111111111111111111111111111111118001a0ae3ce0f5deec815c0978f060a4444485f277c3f47b1a465ce368e34e426f49eea03e9f8631a03543dba183dd8255fa32062b616acc76f5dd8a59987cd47cf8468c01a0d57378cdb8c39fd12bbbaf7ce1128bcf847a15a4fb858a69142a6f9e9629a0dda0264de94a130ddd935a3f29e6da8ce320146ada763982f89d38cb39796e706f81";

    #[test]
    fn test_envelope_golden() {
        let unsigned = UnsignedEnvelope::new(golden_base(), vec![golden_authorization()]).unwrap();
        assert_eq!(
            unsigned.signing_hash(),
            b256!("e448d455b9a9d2a827e33906222e1748d94517bc7f13f780ad4364d99916a3c4")
        );

        let signed = unsigned.sign(&key()).unwrap();
        assert_eq!(hex::encode(signed.encoded()), GOLDEN_ENVELOPE);
        assert_eq!(
            signed.hash(),
            b256!("7a200cdd4c4fad2ab4ef7fb587996f06f950d285c36a2eefc55f633e75f7d0fd")
        );
        assert_eq!(signed.signature().v, 1);
        assert_eq!(signed.recover_sender().unwrap(), TEST_ADDRESS);
    }

    #[test]
    fn test_envelope_decodes_golden() {
        let bytes = hex::decode(GOLDEN_ENVELOPE).unwrap();
        let decoded = SignedEnvelope::decode(&bytes).unwrap();
        assert_eq!(decoded.base(), &golden_base());
        assert_eq!(decoded.authorizations(), &[golden_authorization()]);
        assert_eq!(decoded.recover_sender().unwrap(), TEST_ADDRESS);
        assert_eq!(
            recover_authority(&decoded.authorizations()[0]).unwrap(),
            address_of(&key())
        );
    }

    #[derive(RlpEncodable)]
    struct OracleAccessListItem {
        address: Address,
        storage_keys: Vec<B256>,
    }

    #[derive(RlpEncodable)]
    struct OracleSetCodeTx {
        chain_id: u64,
        nonce: u64,
        max_priority_fee_per_gas: u128,
        max_fee_per_gas: u128,
        gas_limit: u64,
        to: Address,
        value: U256,
        data: Bytes,
        access_list: Vec<OracleAccessListItem>,
        authorization_list: Vec<OracleAuthorization>,
        y_parity: u8,
        r: U256,
        s: U256,
    }

    #[test]
    fn test_envelope_matches_alloy_rlp() {
        let mut base = golden_base();
        base.value = U256::from(12345);
        base.access_list = vec![crate::envelope::AccessListItem {
            address: Address::repeat_byte(0x55),
            storage_keys: vec![B256::repeat_byte(7)],
        }];
        let authorizations = vec![
            golden_authorization(),
            build_authorization(U256::ZERO, Address::repeat_byte(0x66), 9, &key()).unwrap(),
        ];
        let signed = UnsignedEnvelope::new(base.clone(), authorizations.clone())
            .unwrap()
            .sign(&key())
            .unwrap();

        let oracle = OracleSetCodeTx {
            chain_id: base.chain_id,
            nonce: base.nonce,
            max_priority_fee_per_gas: base.gas_price,
            max_fee_per_gas: base.gas_price,
            gas_limit: base.gas_limit,
            to: base.to,
            value: base.value,
            data: base.data.clone(),
            access_list: vec![OracleAccessListItem {
                address: Address::repeat_byte(0x55),
                storage_keys: vec![B256::repeat_byte(7)],
            }],
            authorization_list: authorizations.iter().map(OracleAuthorization::from).collect(),
            y_parity: signed.signature().v,
            r: signed.signature().r,
            s: signed.signature().s,
        };
        let mut expected = vec![account7702_types::SET_CODE_TX_TYPE];
        expected.extend(alloy_rlp::encode(&oracle));
        assert_eq!(signed.encoded(), expected.as_slice());
    }

    #[test]
    fn test_public_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Action>();
        assert_send_sync::<DelegationAuthorization>();
        assert_send_sync::<Eip712Domain>();
        assert_send_sync::<crate::action::SignedAction>();
        assert_send_sync::<UnsignedEnvelope>();
        assert_send_sync::<SignedEnvelope>();
        assert_send_sync::<RlpItem>();
        assert_send_sync::<crate::error::Error>();
        assert_send_sync::<crate::state::StaticAccountState>();
    }
}
