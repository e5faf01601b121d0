mod model_page_tests;
