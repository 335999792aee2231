//! # Supply-Chain Flows
//!
//! Lifecycle, settlement and query properties exercised the way a host calls
//! the chaincode: function names and string arguments in, bytes out.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use fc_01_ledger_gateway::InMemoryKVStore;
    use fc_02_supply_chain::{
        try_invoke, ErrorKind, SupplyChainService, SupplyChainConfig,
    };

    fn service() -> SupplyChainService<InMemoryKVStore> {
        initialized(InMemoryKVStore::new())
    }

    fn error_kind(
        service: &mut SupplyChainService<InMemoryKVStore>,
        function: &str,
        args: &[String],
    ) -> ErrorKind {
        try_invoke(service, function, args)
            .expect_err("invocation should fail")
            .kind()
    }

    const ORGS: [&str; 6] = ["org1", "org2", "org3", "org4", "org5", "org6"];

    fn balances(service: &mut SupplyChainService<InMemoryKVStore>) -> Vec<f64> {
        ORGS.iter().map(|org| balance(service, org)).collect()
    }

    // =========================================================================
    // Creation
    // =========================================================================

    #[test]
    fn test_crude_intake_is_on_way_and_unique() {
        let mut service = service();
        must(&mut service, "deliverCrude", &deliver_crude("Crude1", 1000.0, 50));

        assert_eq!(record(&mut service, "Crude1")["assetDetails"]["state"], "ON_WAY");
        assert_eq!(
            error_kind(&mut service, "deliverCrude", &deliver_crude("Crude1", 1.0, 1)),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_malformed_arguments_are_validation_errors() {
        let mut service = service();

        let mut bad_value = deliver_crude("Crude1", 1000.0, 50);
        bad_value[1] = "a lot".to_string();
        let mut bad_owner = deliver_crude("Crude1", 1000.0, 50);
        bad_owner[3] = "driller".to_string();
        let mut bad_arrival = deliver_crude("Crude1", 1000.0, 50);
        bad_arrival[4] = "tomorrow".to_string();
        let mut wrong_prefix = deliver_crude("Crude1", 1000.0, 50);
        wrong_prefix[0] = "Oil1".to_string();

        for bad in [bad_value, bad_owner, bad_arrival, wrong_prefix] {
            assert_eq!(
                error_kind(&mut service, "deliverCrude", &bad),
                ErrorKind::Validation
            );
        }
        assert_eq!(
            error_kind(&mut service, "deliverCrude", &args(&["Crude1"])),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_refine_requires_crude_and_fresh_id() {
        let mut service = service();
        assert_eq!(
            error_kind(&mut service, "refine", &refine("Fuel1", "Crude1")),
            ErrorKind::NotFound
        );

        must(&mut service, "deliverCrude", &deliver_crude("Crude1", 1000.0, 50));
        must(&mut service, "refine", &refine("Fuel1", "Crude1"));
        assert_eq!(record(&mut service, "Fuel1")["assetDetails"]["state"], "REFINED");

        assert_eq!(
            error_kind(&mut service, "refine", &refine("Fuel1", "Crude1")),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_fuel_order_requires_fuel() {
        let mut service = service();
        assert_eq!(
            error_kind(
                &mut service,
                "addFuelOrder",
                &add_fuel_order("FuelOrder1", "Fuel1", 200.0, 30)
            ),
            ErrorKind::NotFound
        );
    }

    // =========================================================================
    // Delivery plans
    // =========================================================================

    fn with_orders(orders: &[&str]) -> SupplyChainService<InMemoryKVStore> {
        let mut service = service();
        must(&mut service, "deliverCrude", &deliver_crude("Crude1", 1000.0, 50));
        must(&mut service, "refine", &refine("Fuel1", "Crude1"));
        for order in orders {
            must(
                &mut service,
                "addFuelOrder",
                &add_fuel_order(order, "Fuel1", 200.0, 30),
            );
        }
        service
    }

    #[test]
    fn test_plan_dispatches_every_order() {
        let mut service = with_orders(&["FuelOrder1", "FuelOrder2"]);
        must(
            &mut service,
            "deliverFuel",
            &deliver_fuel("Plan1", &["FuelOrder1", "FuelOrder2"]),
        );

        for order in ["FuelOrder1", "FuelOrder2"] {
            assert_eq!(record(&mut service, order)["assetDetails"]["state"], "ON_WAY");
        }
        let plan = record(&mut service, "Plan1");
        assert_eq!(plan["plan"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_plan_with_missing_order_changes_nothing() {
        let mut service = with_orders(&["FuelOrder1"]);

        assert_eq!(
            error_kind(
                &mut service,
                "deliverFuel",
                &deliver_fuel("Plan1", &["FuelOrder1", "FuelOrder2"])
            ),
            ErrorKind::NotFound
        );

        assert_eq!(
            record(&mut service, "FuelOrder1")["assetDetails"]["state"],
            "READY_FOR_DISTRIBUTION"
        );
        assert_eq!(
            error_kind(&mut service, "queryAsset", &args(&["Plan1"])),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_plan_tuple_count_must_be_multiple_of_four() {
        let mut service = with_orders(&["FuelOrder1"]);
        let mut partial = deliver_fuel("Plan1", &["FuelOrder1"]);
        partial.pop();

        assert_eq!(
            error_kind(&mut service, "deliverFuel", &partial),
            ErrorKind::Validation
        );
    }

    // =========================================================================
    // Transfer & settlement
    // =========================================================================

    #[test]
    fn test_settlement_law() {
        let mut service = service();
        must(&mut service, "deliverCrude", &deliver_crude("Crude1", 1000.0, 50));
        must(&mut service, "transfer", &transfer("Crude1", "org3", 0, None));

        assert_eq!(balance(&mut service, "org2"), 100_005.0);
        assert_eq!(balance(&mut service, "org1"), 101_000.0);
        assert_eq!(balance(&mut service, "org3"), 98_995.0);
    }

    #[test]
    fn test_penalty_law() {
        let mut service = service();
        must(&mut service, "deliverCrude", &deliver_crude("Crude1", 1000.0, 50));
        must(&mut service, "deliverCrude", &deliver_crude("Crude2", 1000.0, 50));

        // 250 s late: 5.0 - 2.5
        must(&mut service, "transfer", &transfer("Crude1", "org3", 250, None));
        assert_eq!(balance(&mut service, "org2"), 100_002.5);

        // Early: full fee
        must(&mut service, "transfer", &transfer("Crude2", "org3", -30, None));
        assert_eq!(balance(&mut service, "org2"), 100_007.5);

        assert_eq!(record(&mut service, "Crude1")["deliveryDetails"]["delay"], 250.0);
        assert_eq!(record(&mut service, "Crude2")["deliveryDetails"]["delay"], -30.0);
    }

    #[test]
    fn test_shipper_fee_never_negative() {
        let mut service = service();
        must(&mut service, "deliverCrude", &deliver_crude("Crude1", 1000.0, 50));
        must(&mut service, "transfer", &transfer("Crude1", "org3", 3600, None));

        assert_eq!(balance(&mut service, "org2"), 100_000.0);
        assert_eq!(balance(&mut service, "org3"), 99_000.0);
    }

    #[test]
    fn test_repeated_transfer_is_state_error() {
        let mut service = service();
        must(&mut service, "deliverCrude", &deliver_crude("Crude1", 1000.0, 50));
        must(&mut service, "transfer", &transfer("Crude1", "org3", 0, None));
        let before = balances(&mut service);

        assert_eq!(
            error_kind(&mut service, "transfer", &transfer("Crude1", "org4", 0, None)),
            ErrorKind::State
        );
        assert_eq!(balances(&mut service), before);
    }

    #[test]
    fn test_order_transfer_needs_its_own_plan() {
        let mut service = with_orders(&["FuelOrder1"]);
        must(&mut service, "deliverFuel", &deliver_fuel("Plan1", &["FuelOrder1"]));
        must(
            &mut service,
            "addFuelOrder",
            &add_fuel_order("FuelOrder2", "Fuel1", 200.0, 30),
        );

        must(&mut service, "deliverFuel", &deliver_fuel("Plan2", &["FuelOrder2"]));
        assert_eq!(
            error_kind(
                &mut service,
                "transfer",
                &transfer("FuelOrder2", "org5", 0, Some("Plan1"))
            ),
            ErrorKind::NotFound
        );

        let before = balances(&mut service);
        must(
            &mut service,
            "transfer",
            &transfer("FuelOrder2", "org5", 100, Some("Plan2")),
        );
        let after = balances(&mut service);

        // distributor +2, refiner +200, retailer -202
        assert_eq!(after[3] - before[3], 2.0);
        assert_eq!(after[2] - before[2], 200.0);
        assert_eq!(after[4] - before[4], -202.0);
        assert_eq!(
            record(&mut service, "Plan2")["plan"]["FuelOrder2"]["delay"],
            100.0
        );
    }

    #[test]
    fn test_full_chain_conserves_money() {
        let mut service = with_orders(&["FuelOrder1", "FuelOrder2", "FuelOrder3"]);
        must(&mut service, "transfer", &transfer("Crude1", "org3", 40, None));
        must(
            &mut service,
            "deliverFuel",
            &deliver_fuel("Plan1", &["FuelOrder1", "FuelOrder2", "FuelOrder3"]),
        );
        for (order, owner) in [("FuelOrder1", "org5"), ("FuelOrder2", "org6"), ("FuelOrder3", "org5")] {
            must(&mut service, "transfer", &transfer(order, owner, 10, Some("Plan1")));
            assert_eq!(record(&mut service, order)["assetDetails"]["owner"], owner);
        }

        let total: f64 = balances(&mut service).iter().sum();
        assert!((total - 600_000.0).abs() < 1e-9);
    }

    // =========================================================================
    // Bootstrap & queries
    // =========================================================================

    #[test]
    fn test_init_ledger_once() {
        let mut service = SupplyChainService::new(InMemoryKVStore::new(), SupplyChainConfig::default());
        must(&mut service, "initLedger", &[]);
        assert_eq!(balances(&mut service), vec![100_000.0; 6]);

        assert_eq!(
            error_kind(&mut service, "initLedger", &[]),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_range_query_respects_kind_and_bounds() {
        let mut service = with_orders(&["FuelOrder1"]);
        must(&mut service, "deliverCrude", &deliver_crude("Crude999", 1.0, 1));

        let crude: serde_json::Value =
            serde_json::from_slice(&must(&mut service, "queryAssetByRange", &args(&["Crude"])))
                .unwrap();
        let keys: Vec<&str> = crude
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["key"].as_str().unwrap())
            .collect();
        // Crude999 sits on the exclusive upper bound.
        assert_eq!(keys, vec!["Crude1"]);

        let fuel: serde_json::Value =
            serde_json::from_slice(&must(&mut service, "queryAssetByRange", &args(&["Fuel"])))
                .unwrap();
        let fuel_keys: Vec<&str> = fuel
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["key"].as_str().unwrap())
            .collect();
        assert_eq!(fuel_keys, vec!["Fuel1"]);

        assert_eq!(
            error_kind(&mut service, "queryAssetByRange", &args(&["Oil"])),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_unknown_function() {
        let mut service = service();
        assert_eq!(
            error_kind(&mut service, "queryHistoryForKey", &args(&["Crude1"])),
            ErrorKind::Validation
        );
    }
}
