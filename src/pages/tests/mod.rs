mod wishlist_tests;
