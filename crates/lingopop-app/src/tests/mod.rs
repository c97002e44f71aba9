mod lookup_flow_tests;
