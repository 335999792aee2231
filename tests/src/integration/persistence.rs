//! # File-Backed Ledger
//!
//! Committed invocations survive a reopen; rejected ones leave the file
//! byte-for-byte unchanged.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use fc_01_ledger_gateway::{FileBackedKVStore, KeyValueStore};
    use fc_02_supply_chain::{invoke, Response};

    #[test]
    fn test_committed_invocations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        {
            let mut service = initialized(FileBackedKVStore::open(&path).unwrap());
            must(&mut service, "deliverCrude", &deliver_crude("Crude1", 1000.0, 50));
            must(&mut service, "transfer", &transfer("Crude1", "org3", 0, None));
        }

        let mut service = fc_02_supply_chain::SupplyChainService::new(
            FileBackedKVStore::open(&path).unwrap(),
            Default::default(),
        );
        assert_eq!(balance(&mut service, "org3"), 98_995.0);
        assert_eq!(record(&mut service, "Crude1")["assetDetails"]["owner"], "org3");
    }

    #[test]
    fn test_rejected_invocation_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        let mut service = initialized(FileBackedKVStore::open(&path).unwrap());
        must(&mut service, "deliverCrude", &deliver_crude("Crude1", 1000.0, 50));
        must(&mut service, "refine", &refine("Fuel1", "Crude1"));
        must(
            &mut service,
            "addFuelOrder",
            &add_fuel_order("FuelOrder1", "Fuel1", 200.0, 30),
        );
        let before = std::fs::read(&path).unwrap();

        let response = invoke(
            &mut service,
            "deliverFuel",
            &deliver_fuel("Plan1", &["FuelOrder1", "FuelOrder9"]),
        );
        assert!(matches!(response, Response::Error(_)));

        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert!(service.store().get(b"Plan1").unwrap().is_none());
    }

    #[test]
    fn test_double_init_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        drop(initialized(FileBackedKVStore::open(&path).unwrap()));

        let mut service = fc_02_supply_chain::SupplyChainService::new(
            FileBackedKVStore::open(&path).unwrap(),
            Default::default(),
        );
        match invoke(&mut service, "initLedger", &[]) {
            Response::Error(message) => assert!(message.contains("already")),
            Response::Success(_) => panic!("second initLedger must fail"),
        }
    }
}
