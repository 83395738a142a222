mod test_relay_end_to_end;
